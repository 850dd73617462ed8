use anyhow::{Context, Result};

use crate::export::WindowRule;

pub const DEFAULT_MAX_INPUT_BYTES: usize = 512 * 1024;

/// Runtime configuration loaded from environment variables (and `.env`).
/// Every variable is optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub rust_log: String,
    pub max_input_bytes: usize,
    pub window_rule: WindowRule,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rust_log: "info".to_string(),
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            window_rule: WindowRule::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let max_input_bytes = match lookup("RESUME_MAX_INPUT_BYTES") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|bytes| *bytes > 0)
                .with_context(|| {
                    format!("RESUME_MAX_INPUT_BYTES must be a positive integer, got '{raw}'")
                })?,
            None => defaults.max_input_bytes,
        };

        let window_rule = match lookup("RESUME_WINDOW_RULE") {
            Some(raw) => raw
                .parse::<WindowRule>()
                .context("RESUME_WINDOW_RULE is invalid")?,
            None => defaults.window_rule,
        };

        Ok(Config {
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            max_input_bytes,
            window_rule,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(vars(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.max_input_bytes, 524_288);
        assert_eq!(config.window_rule, WindowRule::Overlap);
    }

    #[test]
    fn test_reads_every_variable() {
        let config = Config::from_lookup(vars(&[
            ("RUST_LOG", "debug"),
            ("RESUME_MAX_INPUT_BYTES", "1024"),
            ("RESUME_WINDOW_RULE", "contained"),
        ]))
        .unwrap();
        assert_eq!(config.rust_log, "debug");
        assert_eq!(config.max_input_bytes, 1024);
        assert_eq!(config.window_rule, WindowRule::Contained);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Config::from_lookup(vars(&[("RESUME_MAX_INPUT_BYTES", "lots")])).unwrap_err();
        assert!(err.to_string().contains("RESUME_MAX_INPUT_BYTES"), "got: {err}");

        assert!(Config::from_lookup(vars(&[("RESUME_MAX_INPUT_BYTES", "0")])).is_err());
        assert!(Config::from_lookup(vars(&[("RESUME_WINDOW_RULE", "strict")])).is_err());
    }
}
