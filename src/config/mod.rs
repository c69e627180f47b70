//! Configuration (layered: defaults < config file < environment < explicit overrides).

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{JournalistError, Result};
use crate::export::DEFAULT_OUTPUT_DIR;
use crate::termination::DEFAULT_SENTINEL;
use crate::tools::search::{DEFAULT_NUM_RESULTS, DEFAULT_SEARCH_BASE_URL};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_MAX_ROUNDS: usize = 5;
pub const CONFIG_FILE_NAME: &str = "journalist.toml";

/// Runtime configuration for the newsroom.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct JournalistConfig {
    /// Chat model identifier.
    pub model: String,
    pub openai_api_key: Option<String>,
    /// Override for OpenAI-compatible endpoints.
    pub openai_base_url: Option<String>,
    pub search_api_key: Option<String>,
    pub search_base_url: String,
    pub output_dir: PathBuf,
    pub max_rounds: usize,
    pub num_results: usize,
    pub termination_sentinel: String,
    pub temperature: Option<f64>,
}

impl Default for JournalistConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            openai_api_key: None,
            openai_base_url: None,
            search_api_key: None,
            search_base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            max_rounds: DEFAULT_MAX_ROUNDS,
            num_results: DEFAULT_NUM_RESULTS,
            termination_sentinel: DEFAULT_SENTINEL.to_string(),
            temperature: None,
        }
    }
}

impl fmt::Debug for JournalistConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(key: &Option<String>) -> Option<&'static str> {
            key.as_ref().map(|_| "<redacted>")
        }
        f.debug_struct("JournalistConfig")
            .field("model", &self.model)
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("openai_base_url", &self.openai_base_url)
            .field("search_api_key", &redact(&self.search_api_key))
            .field("search_base_url", &self.search_base_url)
            .field("output_dir", &self.output_dir)
            .field("max_rounds", &self.max_rounds)
            .field("num_results", &self.num_results)
            .field("termination_sentinel", &self.termination_sentinel)
            .field("temperature", &self.temperature)
            .finish()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl JournalistConfig {
    /// Parse a TOML config file. Missing keys keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&text)?)
    }

    /// Defaults overlaid with the environment (and `.env`, if present).
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load the full layered configuration.
    ///
    /// `path` wins over the platform config file; the platform file is only
    /// read when it exists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let _ = dotenvy::dotenv();
        let file = path
            .map(Path::to_path_buf)
            .or_else(|| Self::default_config_path().filter(|p| p.is_file()));

        let mut config = match file {
            Some(ref file) => {
                debug!(path = %file.display(), "loading config file");
                Self::from_file(file)?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Platform config location, e.g. `~/.config/journalist/journalist.toml`.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "journalist")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Overlay values from an environment lookup.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(v) = lookup("OPENAI_API_KEY") {
            self.openai_api_key = Some(v);
        }
        if let Some(v) = lookup("OPENAI_BASE_URL") {
            self.openai_base_url = Some(v);
        }
        if let Some(v) = lookup("JOURNALIST_MODEL") {
            self.model = v;
        }
        if let Some(v) = lookup("SERPER_API_KEY") {
            self.search_api_key = Some(v);
        }
        if let Some(v) = lookup("SERPER_BASE_URL") {
            self.search_base_url = v;
        }
        if let Some(v) = lookup("JOURNALIST_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("JOURNALIST_MAX_ROUNDS") {
            self.max_rounds = v.trim().parse().map_err(|_| {
                JournalistError::Configuration(format!("JOURNALIST_MAX_ROUNDS is not a number: {v}"))
            })?;
        }
        Ok(())
    }

    pub fn with_openai_api_key(mut self, key: impl Into<String>) -> Self {
        self.openai_api_key = Some(key.into());
        self
    }

    pub fn with_openai_base_url(mut self, url: impl Into<String>) -> Self {
        self.openai_base_url = Some(url.into());
        self
    }

    pub fn with_search_api_key(mut self, key: impl Into<String>) -> Self {
        self.search_api_key = Some(key.into());
        self
    }

    pub fn with_search_base_url(mut self, url: impl Into<String>) -> Self {
        self.search_base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// The model credential, treating blank values as absent.
    pub fn openai_api_key(&self) -> Option<&str> {
        non_blank(&self.openai_api_key)
    }

    /// The search credential, treating blank values as absent.
    pub fn search_api_key(&self) -> Option<&str> {
        non_blank(&self.search_api_key)
    }

    /// Check everything a conversation needs before one is started.
    pub fn validate(&self) -> Result<()> {
        if self.openai_api_key().is_none() {
            return Err(JournalistError::MissingCredential("OPENAI_API_KEY".into()));
        }
        if self.search_api_key().is_none() {
            return Err(JournalistError::MissingCredential("SERPER_API_KEY".into()));
        }
        if self.model.trim().is_empty() {
            return Err(JournalistError::Configuration("model must not be empty".into()));
        }
        if self.max_rounds == 0 {
            return Err(JournalistError::Configuration("max_rounds must be at least 1".into()));
        }
        if self.termination_sentinel.is_empty() {
            return Err(JournalistError::Configuration(
                "termination_sentinel must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn complete() -> JournalistConfig {
        JournalistConfig::default()
            .with_openai_api_key("sk-test")
            .with_search_api_key("serper-test")
    }

    #[test]
    fn defaults_match_the_newsroom() {
        let config = JournalistConfig::default();
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.max_rounds, 5);
        assert_eq!(config.num_results, 5);
        assert_eq!(config.output_dir, PathBuf::from("generated_articles"));
        assert_eq!(config.search_base_url, "https://google.serper.dev");
        assert_eq!(config.termination_sentinel, "TERMINATE");
    }

    #[test]
    fn env_overrides_defaults() {
        let mut config = JournalistConfig::default();
        config
            .apply_env(lookup(&[
                ("OPENAI_API_KEY", "sk-env"),
                ("SERPER_API_KEY", "serper-env"),
                ("JOURNALIST_MODEL", "gpt-4o-mini"),
                ("JOURNALIST_MAX_ROUNDS", "8"),
            ]))
            .unwrap();
        assert_eq!(config.openai_api_key(), Some("sk-env"));
        assert_eq!(config.search_api_key(), Some("serper-env"));
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.max_rounds, 8);
    }

    #[test]
    fn bad_max_rounds_is_a_configuration_error() {
        let mut config = JournalistConfig::default();
        let err = config
            .apply_env(lookup(&[("JOURNALIST_MAX_ROUNDS", "many")]))
            .unwrap_err();
        assert!(matches!(err, JournalistError::Configuration(_)));
    }

    #[test]
    fn blank_keys_count_as_missing() {
        let config = complete().with_search_api_key(" ");
        assert!(matches!(
            config.validate(),
            Err(JournalistError::MissingCredential(ref name)) if name == "SERPER_API_KEY"
        ));

        let config = complete().with_openai_api_key("");
        assert!(matches!(
            config.validate(),
            Err(JournalistError::MissingCredential(ref name)) if name == "OPENAI_API_KEY"
        ));
    }

    #[test]
    fn zero_rounds_is_rejected() {
        assert!(complete().validate().is_ok());
        assert!(matches!(
            complete().with_max_rounds(0).validate(),
            Err(JournalistError::Configuration(_))
        ));
    }

    #[test]
    fn file_values_keep_defaults_for_missing_keys() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "model = \"gpt-4o\"\nmax_rounds = 9\n").unwrap();

        let config = JournalistConfig::from_file(&path).unwrap();
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.max_rounds, 9);
        assert_eq!(config.num_results, 5);
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "max_rounds = \"five\"").unwrap();
        assert!(matches!(
            JournalistConfig::from_file(&path),
            Err(JournalistError::ConfigFile(_))
        ));
    }

    #[test]
    fn debug_redacts_keys() {
        let text = format!("{:?}", complete());
        assert!(!text.contains("sk-test"));
        assert!(text.contains("<redacted>"));
    }
}
