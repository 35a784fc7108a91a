//! Configuration loading
//!
//! Two YAML layers are read from the working directory and deep-merged:
//! `build.common.properties.yml` (committed) and `build.local.properties.yml`
//! (per machine, optional). Unknown keys are collected as warnings per layer
//! so each one can point at its file and line.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml_ng::Value;

use crate::error::{PapError, PapResult};

use super::tree::{is_blank, ConfigTree};
use super::types::{Config, Settings, StageConfig};

/// Committed configuration layer
pub const COMMON_FILE: &str = "build.common.properties.yml";
/// Machine specific layer, merged over the common one
pub const LOCAL_FILE: &str = "build.local.properties.yml";

/// Overrides the detected repository path
pub const ENV_REPOSITORY_PATH: &str = "PAP_REPOSITORY_PATH";

/// Key the resolved repository path is stored under
pub const REPOSITORY_PATH_KEY: &str = "repository-path";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub path: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown config key '{}' in {}", self.path, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawConfig {
    #[serde(default)]
    settings: Settings,
    #[serde(default)]
    stages: BTreeMap<String, StageConfig>,
    #[serde(default)]
    repository_path: Option<String>,
}

/// Load both layers from `dir`. `detect` is asked for the repository root
/// only when neither the files nor the environment provide one.
pub fn load<F>(dir: &Path, detect: F) -> PapResult<Config>
where
    F: FnOnce() -> Option<String>,
{
    let mut tree = ConfigTree::default();
    let mut sources = Vec::new();
    let mut warnings = Vec::new();

    for name in [COMMON_FILE, LOCAL_FILE] {
        let path = dir.join(name);
        if !path.is_file() {
            tracing::debug!(file = %path.display(), "configuration layer not present");
            continue;
        }
        let content = fs::read_to_string(&path)?;
        let layer = ConfigTree::from_yaml(&content).map_err(|e| PapError::Config {
            file: path.clone(),
            message: e.to_string(),
        })?;
        warnings.extend(collect_warnings(&layer, &content, &path)?);
        tree.merge(layer);
        tracing::debug!(file = %path.display(), "configuration layer loaded");
        sources.push(path);
    }

    let repository_path = std::env::var(ENV_REPOSITORY_PATH)
        .ok()
        .filter(|p| !p.trim().is_empty())
        .or_else(|| tree.get_string(REPOSITORY_PATH_KEY))
        .or_else(detect);

    let mut config = from_tree(tree, repository_path, sources)?;
    config.warnings = warnings;
    Ok(config)
}

/// Build typed views over an already merged tree
pub(crate) fn from_tree(
    mut tree: ConfigTree,
    repository_path: Option<String>,
    sources: Vec<PathBuf>,
) -> PapResult<Config> {
    let repository_path = repository_path
        .filter(|p| !p.trim().is_empty())
        .map(with_trailing_separator)
        .ok_or(PapError::MissingRepositoryPath)?;
    tree.set(REPOSITORY_PATH_KEY, Value::String(repository_path.clone()));

    let file = sources.last().cloned().unwrap_or_default();
    let raw: RawConfig = serde_yaml_ng::from_value(without_nulls(tree.root()))
        .map_err(|e| PapError::Config {
            file,
            message: e.to_string(),
        })?;

    let stages = raw
        .stages
        .into_iter()
        .filter(|(name, _)| {
            tree.get(&format!("stages.{}", name))
                .is_some_and(|value| !is_blank(value))
        })
        .map(|(name, mut stage)| {
            stage.name = name.clone();
            (name, stage)
        })
        .collect();

    Ok(Config {
        tree,
        settings: raw.settings,
        stages,
        repository_path,
        sources,
        warnings: Vec::new(),
    })
}

fn collect_warnings(
    layer: &ConfigTree,
    content: &str,
    path: &Path,
) -> PapResult<Vec<ConfigWarning>> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let _: RawConfig = serde_ignored::deserialize(without_nulls(layer.root()), |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| PapError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(unknown_paths
        .into_iter()
        .filter(|p| !is_free_form(p))
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
                key,
                path: path_str,
                file: path.to_path_buf(),
            }
        })
        .collect())
}

/// Top-level keys outside `settings`/`stages` are reachable via `show`
fn is_free_form(path: &str) -> bool {
    !(path.starts_with("settings.") || path.starts_with("stages."))
}

/// Null leaves mean "not configured"; drop them so serde defaults apply
fn without_nulls(value: &Value) -> Value {
    match value {
        Value::Mapping(map) => Value::Mapping(
            map.iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), without_nulls(v)))
                .collect(),
        ),
        Value::Sequence(seq) => Value::Sequence(seq.iter().map(without_nulls).collect()),
        other => other.clone(),
    }
}

fn with_trailing_separator(path: String) -> String {
    let trimmed = path.trim().to_string();
    if trimmed.ends_with('/') {
        trimmed
    } else {
        format!("{}/", trimmed)
    }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    let pattern = format!("{}:", needle);
    content
        .lines()
        .position(|line| line.trim_start().starts_with(&pattern))
        .map(|i| i + 1)
}

pub(crate) fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "settings",
        "stages",
        "lint",
        "lint-paths",
        "fix",
        "scripts",
        "test",
        "unit",
        "integration",
        "codeception",
        "suite",
        "assets",
        "grunt",
        "task",
        "mirror",
        "concat",
        "sources",
        "source",
        "target",
        "minify-css",
        "minify-js",
        "minify-img",
        "composer",
        "phar",
        "working-directory",
        "sync-paths",
        "prepare-sync-paths",
        "exclude",
        "watch",
        "host",
        "user",
        "port",
        "origin",
        "rsync",
        "options",
        "lock-branches",
        "deny-groups",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0usize; b_chars.len() + 1];

    for (i, ac) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, bc) in b_chars.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}
