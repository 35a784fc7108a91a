//! Configuration type definitions

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::ports::RemoteTarget;
use crate::error::PapResult;

use super::loader::{self, ConfigWarning};
use super::tree::ConfigTree;

/// A list of shell commands registered in the configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptSettings {
    #[serde(default)]
    pub scripts: Vec<String>,
}

/// `settings.lint`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LintSettings {
    #[serde(default)]
    pub scripts: Vec<String>,
    #[serde(default)]
    pub lint_paths: Vec<String>,
    #[serde(default)]
    pub fix: ScriptSettings,
}

/// `settings.test.codeception`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CodeceptionSettings {
    #[serde(default)]
    pub working_directory: Option<String>,
    #[serde(default)]
    pub suite: Option<String>,
}

/// `settings.test`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TestSettings {
    /// Legacy integration test scripts
    #[serde(default)]
    pub scripts: Vec<String>,
    #[serde(default)]
    pub unit: ScriptSettings,
    #[serde(default)]
    pub integration: ScriptSettings,
    #[serde(default)]
    pub codeception: CodeceptionSettings,
}

impl TestSettings {
    /// Integration scripts, falling back to the legacy `scripts` list
    pub fn integration_scripts(&self) -> &[String] {
        if self.integration.scripts.is_empty() {
            &self.scripts
        } else {
            &self.integration.scripts
        }
    }
}

/// `settings.assets.grunt` (deprecated in favour of scripts)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GruntSettings {
    #[serde(default)]
    pub working_directory: Option<String>,
    #[serde(default)]
    pub task: Option<String>,
}

/// Source/target pair relative to the repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathPair {
    pub source: String,
    pub target: String,
}

/// `settings.assets.concat[]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConcatSettings {
    pub sources: Vec<String>,
    pub target: String,
}

/// `settings.assets`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AssetSettings {
    #[serde(default)]
    pub grunt: Option<GruntSettings>,
    #[serde(default)]
    pub scripts: Vec<String>,
    #[serde(default)]
    pub mirror: Option<PathPair>,
    #[serde(default)]
    pub concat: Vec<ConcatSettings>,
    #[serde(default)]
    pub minify_css: Vec<PathPair>,
    #[serde(default)]
    pub minify_js: Vec<PathPair>,
    #[serde(default)]
    pub minify_img: Vec<PathPair>,
}

impl AssetSettings {
    pub fn is_empty(&self) -> bool {
        self == &AssetSettings::default()
    }

    pub fn has_minify(&self) -> bool {
        !(self.minify_css.is_empty() && self.minify_js.is_empty() && self.minify_img.is_empty())
    }
}

/// `settings.composer`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ComposerSettings {
    #[serde(default)]
    pub phar: Option<String>,
    #[serde(default)]
    pub working_directory: Option<String>,
}

impl ComposerSettings {
    pub fn is_empty(&self) -> bool {
        self == &ComposerSettings::default()
    }
}

/// `settings.sync-paths[]` and `settings.prepare-sync-paths[]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncPath {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// `settings.watch`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WatchSettings {
    #[serde(default)]
    pub working_directory: Option<String>,
}

/// Everything below `settings`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    #[serde(default)]
    pub lint: LintSettings,
    #[serde(default)]
    pub test: TestSettings,
    #[serde(default)]
    pub assets: AssetSettings,
    #[serde(default)]
    pub composer: ComposerSettings,
    #[serde(default)]
    pub sync_paths: Vec<SyncPath>,
    #[serde(default)]
    pub prepare_sync_paths: Vec<SyncPath>,
    #[serde(default)]
    pub watch: WatchSettings,
}

/// `stages.<name>.rsync`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRsync {
    #[serde(default)]
    pub options: Option<String>,
}

/// `stages.<name>.test`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StageTest {
    #[serde(default)]
    pub deny_groups: Vec<String>,
}

/// `stages.<name>.composer`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageComposer {
    #[serde(default)]
    pub phar: Option<String>,
}

/// A deployment target (`stages.<name>`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StageConfig {
    #[serde(skip)]
    pub name: String,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default, deserialize_with = "deserialize_port")]
    pub port: Option<u16>,
    #[serde(default)]
    pub working_directory: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub rsync: StageRsync,
    #[serde(default)]
    pub lock_branches: Vec<String>,
    #[serde(default)]
    pub test: StageTest,
    #[serde(default)]
    pub composer: StageComposer,
}

impl StageConfig {
    pub fn is_local(&self) -> bool {
        self.name == LOCAL_STAGE
    }

    /// Origin URL, if one is configured
    pub fn origin(&self) -> Option<&str> {
        non_blank(self.origin.as_deref())
    }

    pub fn working_directory(&self) -> &str {
        self.working_directory.as_deref().unwrap_or("")
    }

    /// SSH coordinates; `None` when host or user is missing
    pub fn remote(&self) -> Option<RemoteTarget> {
        let host = non_blank(self.host.as_deref())?;
        let user = non_blank(self.user.as_deref())?;
        Some(RemoteTarget {
            host: host.to_string(),
            user: user.to_string(),
            port: self.port,
            working_dir: self.working_directory().to_string(),
        })
    }

    /// Composer binary on the stage host
    pub fn composer_phar(&self) -> &str {
        non_blank(self.composer.phar.as_deref()).unwrap_or(DEFAULT_COMPOSER)
    }
}

/// Name of the stage that lives on the developer machine
pub const LOCAL_STAGE: &str = "local";

/// Composer binary used when none is configured
pub const DEFAULT_COMPOSER: &str = "composer";

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn deserialize_port<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Number(u16),
        Text(String),
    }

    match Option::<Port>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Port::Number(port)) => Ok(Some(port)),
        Some(Port::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Port::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid port '{}'", text))),
    }
}

/// Loaded configuration: merged tree plus typed views
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub(super) tree: ConfigTree,
    pub(super) settings: Settings,
    pub(super) stages: BTreeMap<String, StageConfig>,
    pub(super) repository_path: String,
    pub(super) sources: Vec<PathBuf>,
    pub(super) warnings: Vec<ConfigWarning>,
}

impl Config {
    /// Load the layered configuration files found in `dir`.
    ///
    /// `detect_repository` is only consulted when neither the files nor
    /// `PAP_REPOSITORY_PATH` name the repository root.
    pub fn load<F>(dir: &Path, detect_repository: F) -> PapResult<Self>
    where
        F: FnOnce() -> Option<String>,
    {
        loader::load(dir, detect_repository)
    }

    /// Build a configuration from a single YAML document (tests, tooling)
    pub fn from_yaml(content: &str, repository_path: &str) -> PapResult<Self> {
        let tree = ConfigTree::from_yaml(content)?;
        loader::from_tree(tree, Some(repository_path.to_string()), Vec::new())
    }

    /// Raw dotted-path lookup
    pub fn get(&self, path: &str) -> Option<&serde_yaml_ng::Value> {
        self.tree.get(path)
    }

    pub fn tree(&self) -> &ConfigTree {
        &self.tree
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Configured stage, `None` when absent or empty
    pub fn stage(&self, name: &str) -> Option<&StageConfig> {
        self.stages.get(name)
    }

    pub fn stages(&self) -> impl Iterator<Item = &StageConfig> {
        self.stages.values()
    }

    /// Absolute repository path, always ending with a separator
    pub fn repository_path(&self) -> &str {
        &self.repository_path
    }

    /// `relative` inside the repository
    pub fn repo_path(&self, relative: &str) -> String {
        format!("{}{}", self.repository_path, relative)
    }

    /// Files the configuration was read from, in merge order
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Non-fatal problems such as unknown keys
    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }
}
