//! Configuration module for pap
//!
//! Configuration hierarchy:
//! 1. Environment variables (`PAP_REPOSITORY_PATH`)
//! 2. Machine config (`build.local.properties.yml`)
//! 3. Project config (`build.common.properties.yml`)
//! 4. Detected values (git repository root)

mod loader;
mod tree;
mod types;

pub use loader::{ConfigWarning, COMMON_FILE, ENV_REPOSITORY_PATH, LOCAL_FILE, REPOSITORY_PATH_KEY};
pub use tree::{is_blank, ConfigTree};
pub use types::{
    AssetSettings, CodeceptionSettings, ComposerSettings, ConcatSettings, Config, GruntSettings,
    LintSettings, PathPair, ScriptSettings, Settings, StageConfig, SyncPath, TestSettings,
    WatchSettings, DEFAULT_COMPOSER, LOCAL_STAGE,
};
