//! Runtime configuration for the replay binary.

use std::path::PathBuf;

/// Environment variable naming the segment store file.
pub const STORE_PATH_VAR: &str = "LINE_STORE_PATH";

/// Environment variable holding the log filter directive.
pub const LOG_FILTER_VAR: &str = "LINE_LOG";

/// Configuration for replaying line edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayConfig {
    /// JSON file the edited segments are saved to.
    pub store_path: PathBuf,

    /// `tracing_subscriber::EnvFilter` directive, e.g. `info` or
    /// `subway_line=debug`.
    pub log_filter: String,
}

impl ReplayConfig {
    /// Create a configuration with the given store path and default logging.
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
            ..Self::default()
        }
    }

    /// Read the configuration from the process environment.
    ///
    /// Unset variables fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            store_path: lookup(STORE_PATH_VAR)
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.store_path),
            log_filter: lookup(LOG_FILTER_VAR)
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.log_filter),
        }
    }
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("line_store.json"),
            log_filter: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config() {
        let config = ReplayConfig::default();

        assert_eq!(config.store_path, PathBuf::from("line_store.json"));
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn custom_store_path() {
        let config = ReplayConfig::new("/tmp/lines.json");

        assert_eq!(config.store_path, PathBuf::from("/tmp/lines.json"));
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn lookup_overrides_defaults() {
        let env: HashMap<&str, &str> = [
            (STORE_PATH_VAR, "data/line2.json"),
            (LOG_FILTER_VAR, "subway_line=debug"),
        ]
        .into_iter()
        .collect();

        let config = ReplayConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.store_path, PathBuf::from("data/line2.json"));
        assert_eq!(config.log_filter, "subway_line=debug");
    }

    #[test]
    fn empty_values_use_defaults() {
        let config = ReplayConfig::from_lookup(|_| Some(String::new()));

        assert_eq!(config, ReplayConfig::default());
    }
}
