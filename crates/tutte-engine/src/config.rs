//! Engine configuration, read from TOML.
//!
//! ```toml
//! program = "/opt/tutte/tutte_bhkk"
//! args = []
//! timeout_secs = 120   # 0 waits forever
//! ```
//!
//! The same keys may sit under an `[engine]` table of a larger project file;
//! see [`EngineConfig::from_manifest_str`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Where the engine lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Engine executable. Resolved through `PATH` when it has no separator.
    #[serde(default = "default_program")]
    pub program: PathBuf,
    /// Extra arguments passed before any input is written.
    #[serde(default)]
    pub args: Vec<String>,
    /// Wall-clock limit per invocation in seconds; 0 disables it.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// How often the child is polled for exit, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_program() -> PathBuf {
    PathBuf::from("./tutte_bhkk")
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_poll_interval_ms() -> u64 {
    10
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: Vec::new(),
            timeout_secs: default_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

#[derive(Deserialize)]
struct Manifest {
    #[serde(default)]
    engine: Option<EngineConfig>,
}

impl EngineConfig {
    /// Defaults with a different executable.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Set the per-invocation limit. `None` waits forever.
    ///
    /// Sub-second durations round up to one second.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout_secs = match timeout {
            None => 0,
            Some(t) if t.subsec_nanos() > 0 => t.as_secs() + 1,
            Some(t) => t.as_secs().max(1),
        };
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    /// Parse a standalone engine config document.
    pub fn from_toml_str(content: &str) -> Result<Self, EngineError> {
        toml::from_str(content).map_err(|e| EngineError::Config {
            origin: "<string>".into(),
            message: e.to_string(),
        })
    }

    /// Read the `[engine]` table of a project file, falling back to defaults
    /// when the table is absent.
    pub fn from_manifest_str(content: &str) -> Result<Self, EngineError> {
        let manifest: Manifest = toml::from_str(content).map_err(|e| EngineError::Config {
            origin: "<manifest>".into(),
            message: e.to_string(),
        })?;
        Ok(manifest.engine.unwrap_or_default())
    }

    /// Load a standalone engine config file.
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let content = std::fs::read_to_string(path).map_err(|e| EngineError::Config {
            origin: path.display().to_string(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| EngineError::Config {
            origin: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.program, PathBuf::from("./tutte_bhkk"));
        assert!(cfg.args.is_empty());
        assert_eq!(cfg.timeout(), Some(Duration::from_secs(60)));
        assert_eq!(cfg.poll_interval(), Duration::from_millis(10));
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn parse_full_document() {
        let cfg = EngineConfig::from_toml_str(
            r#"
            program = "/opt/tutte/tutte_bhkk"
            args = ["--quiet"]
            timeout_secs = 0
            poll_interval_ms = 5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.program, PathBuf::from("/opt/tutte/tutte_bhkk"));
        assert_eq!(cfg.args, vec!["--quiet".to_string()]);
        assert_eq!(cfg.timeout(), None);
        assert_eq!(cfg.poll_interval(), Duration::from_millis(5));
    }

    #[test]
    fn unknown_key_rejected() {
        let err = EngineConfig::from_toml_str("timeout = 3").unwrap_err();
        assert!(matches!(err, EngineError::Config { .. }));
    }

    #[test]
    fn manifest_engine_table() {
        let cfg = EngineConfig::from_manifest_str(
            r#"
            [project]
            name = "graphs"

            [engine]
            program = "tutte_bhkk"
            timeout_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.program, PathBuf::from("tutte_bhkk"));
        assert_eq!(cfg.timeout(), Some(Duration::from_secs(5)));

        let fallback = EngineConfig::from_manifest_str("[project]\nname = \"x\"\n").unwrap();
        assert_eq!(fallback, EngineConfig::default());
    }

    #[test]
    fn timeout_builder_rounds_up() {
        let cfg = EngineConfig::default().with_timeout(Some(Duration::from_millis(1500)));
        assert_eq!(cfg.timeout_secs, 2);
        let cfg = cfg.with_timeout(Some(Duration::ZERO));
        assert_eq!(cfg.timeout_secs, 1);
        let cfg = cfg.with_timeout(None);
        assert_eq!(cfg.timeout(), None);
    }

    #[test]
    fn builder_args() {
        let cfg = EngineConfig::new("engine").with_args(["-a", "-b"]);
        assert_eq!(cfg.args, vec!["-a".to_string(), "-b".to_string()]);
    }
}
