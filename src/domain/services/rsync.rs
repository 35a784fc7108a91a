//! Rsync command lines
//!
//! Two flavours are needed: mirroring inside the repository
//! (`prepare-sync-paths`, asset mirrors) and pushing to a stage.

use crate::domain::ports::{CommandSpec, RemoteTarget};

/// Builder for an `rsync` invocation
#[derive(Debug, Clone, Default)]
pub struct Rsync {
    options: Vec<String>,
    excludes: Vec<String>,
    source: String,
    destination: String,
    port: Option<u16>,
    delete: bool,
    verbose: bool,
}

impl Rsync {
    /// Recursive archive copy between two local paths, removing extraneous files
    pub fn mirror(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            options: vec!["-r".to_string(), "-a".to_string()],
            source: source.into(),
            destination: target.into(),
            delete: true,
            ..Default::default()
        }
    }

    /// Push `source` to `path` on a stage. Without a remote the stage lives
    /// on this machine and `path` is used as is.
    pub fn to_stage(source: impl Into<String>, remote: Option<&RemoteTarget>, path: &str) -> Self {
        let (destination, port) = match remote {
            Some(remote) => (format!("{}:{}", remote.destination(), path), remote.port),
            None => (path.to_string(), None),
        };
        Self {
            source: source.into(),
            destination,
            port,
            delete: true,
            verbose: true,
            ..Default::default()
        }
    }

    /// Raw option string from the configuration, split like a POSIX shell
    /// would split it (`--rsh="ssh -i key"` stays one argument)
    pub fn raw_options(mut self, options: Option<&str>) -> Result<Self, shell_words::ParseError> {
        if let Some(options) = options {
            self.options.extend(shell_words::split(options)?);
        }
        Ok(self)
    }

    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn build(&self) -> CommandSpec {
        let mut spec = CommandSpec::new("rsync").args(self.options.iter().cloned());
        if let Some(port) = self.port {
            spec = spec.arg("-e").arg(format!("ssh -p {}", port));
        }
        for pattern in &self.excludes {
            spec = spec.arg(format!("--exclude={}", pattern));
        }
        spec = spec.arg(&self.source).arg(&self.destination);
        if self.delete {
            spec = spec.arg("--delete");
        }
        if self.verbose {
            spec = spec.arg("-v");
        }
        spec
    }
}
