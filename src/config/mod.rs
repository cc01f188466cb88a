use std::path::PathBuf;

use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

const ENV_PREFIX: &str = "FORAGE_";

/// Configuration for the application
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// JSON fixture to load projects from (`FORAGE_FIXTURE_PATH`); the
    /// built-in seed is used when unset
    pub fixture_path: Option<PathBuf>,
    /// File receiving log output (`FORAGE_LOG_FILE`); logging is off when unset
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function will:
    /// 1. Load variables from .env file if it exists
    /// 2. Deserialize `FORAGE_`-prefixed environment variables into Config
    pub fn load() -> Result<Self> {
        dotenv().ok();

        Self::from_pairs(std::env::vars())
    }

    fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::prefixed(ENV_PREFIX).from_iter(pairs)?)
    }

    /// A command-line fixture wins over the environment one
    pub fn with_fixture_override(mut self, fixture: Option<PathBuf>) -> Self {
        if fixture.is_some() {
            self.fixture_path = fixture;
        }
        self
    }
}

/// Initialize environment variables and load configuration
pub fn init() -> Result<Config> {
    Config::load()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(vars: &[(&str, &str)]) -> Vec<(String, String)> {
        vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn everything_is_optional() {
        let config = Config::from_pairs(pairs(&[("HOME", "/root")])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn reads_prefixed_variables() {
        let config = Config::from_pairs(pairs(&[
            ("FORAGE_FIXTURE_PATH", "/data/projects.json"),
            ("FORAGE_LOG_FILE", "/tmp/forage.log"),
        ]))
        .unwrap();
        assert_eq!(config.fixture_path, Some(PathBuf::from("/data/projects.json")));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/forage.log")));
    }

    #[test]
    fn cli_fixture_overrides_environment() {
        let config = Config::from_pairs(pairs(&[("FORAGE_FIXTURE_PATH", "/env.json")]))
            .unwrap()
            .with_fixture_override(Some(PathBuf::from("/cli.json")));
        assert_eq!(config.fixture_path, Some(PathBuf::from("/cli.json")));

        let kept = Config::from_pairs(pairs(&[("FORAGE_FIXTURE_PATH", "/env.json")]))
            .unwrap()
            .with_fixture_override(None);
        assert_eq!(kept.fixture_path, Some(PathBuf::from("/env.json")));
    }
}
