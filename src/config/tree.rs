//! Nested configuration mapping with dotted-path access
//!
//! The merged YAML documents are kept as one `serde_yaml_ng::Value` so that
//! arbitrary keys (`stages.live.origin`, `settings.lint.lint-paths`) can be
//! looked up without a typed struct for every corner.

use serde::de::DeserializeOwned;
use serde_yaml_ng::{Mapping, Value};

/// Merged configuration documents
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigTree {
    root: Value,
}

impl Default for ConfigTree {
    fn default() -> Self {
        Self {
            root: Value::Mapping(Mapping::new()),
        }
    }
}

impl ConfigTree {
    pub fn new(root: Value) -> Self {
        match root {
            Value::Null => Self::default(),
            root => Self { root },
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml_ng::Error> {
        let has_content = content.lines().any(|line| {
            let line = line.trim();
            !(line.is_empty() || line.starts_with('#') || line == "---")
        });
        if !has_content {
            return Ok(Self::default());
        }
        Ok(Self::new(serde_yaml_ng::from_str(content)?))
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Look up a dotted key path. An empty path returns the root.
    pub fn get(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return Some(&self.root);
        }
        path.split('.')
            .try_fold(&self.root, |node, key| node.as_mapping()?.get(key))
    }

    /// Like `get`, but treats blank values (null, "", empty lists/maps) as absent
    pub fn get_present(&self, path: &str) -> Option<&Value> {
        self.get(path).filter(|value| !is_blank(value))
    }

    /// Scalar at `path` rendered as a string; blank values are `None`
    pub fn get_string(&self, path: &str) -> Option<String> {
        self.get_present(path).and_then(scalar_to_string)
    }

    /// Deserialize the sub-tree at `path`
    pub fn get_as<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Option<Result<T, serde_yaml_ng::Error>> {
        self.get_present(path)
            .map(|value| serde_yaml_ng::from_value(value.clone()))
    }

    /// Set a top-level key
    pub fn set(&mut self, key: &str, value: Value) {
        if !self.root.is_mapping() {
            self.root = Value::Mapping(Mapping::new());
        }
        if let Value::Mapping(map) = &mut self.root {
            map.insert(Value::String(key.to_string()), value);
        }
    }

    /// Overlay `other` on top of this tree. Mappings merge key by key,
    /// everything else (scalars, lists) is replaced.
    pub fn merge(&mut self, other: ConfigTree) {
        merge_values(&mut self.root, other.root);
    }

    /// Names of the direct children of the mapping at `path`
    pub fn keys(&self, path: &str) -> Vec<String> {
        self.get(path)
            .and_then(Value::as_mapping)
            .map(|map| map.keys().filter_map(scalar_to_string).collect())
            .unwrap_or_default()
    }
}

fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Empty in the sense of "nothing configured here"
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.trim().is_empty(),
        Value::Sequence(seq) => seq.is_empty(),
        Value::Mapping(map) => map.is_empty(),
        Value::Number(_) => false,
        Value::Tagged(tagged) => is_blank(&tagged.value),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
