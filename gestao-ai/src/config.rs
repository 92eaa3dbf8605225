use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variables consulted for each credential, in order
const GROQ_KEY_VARS: &[&str] = &["GROQ_API_KEY", "VITE_GROQ_API_KEY"];
const TOGETHER_KEY_VARS: &[&str] = &["TOGETHER_API_KEY", "VITE_TOGETHER_API_KEY"];

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub providers: ProvidersConfig,
    pub api_keys: ApiKeysConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ProvidersConfig {
    pub request_timeout_secs: u64,
    /// Records sent to the compact (credential-gated) providers
    pub context_limit: usize,
    pub free_tier_enabled: bool,
    pub together_base_url: Option<String>,
    pub groq_base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ApiKeysConfig {
    pub groq_api_key: Option<String>,
    pub together_api_key: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    pub path: Option<PathBuf>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 60,
            context_limit: 8,
            free_tier_enabled: true,
            together_base_url: None,
            groq_base_url: None,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

impl AppConfig {
    /// Load defaults, then the config file, then `GESTAO_AI_*` variables,
    /// then the plain provider key variables for keys still unset.
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::load_layers(path)?;
        config.api_keys.fill_missing(|name| std::env::var(name).ok());
        Ok(config)
    }

    fn load_layers(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path.to_path_buf()).required(true),
            None => File::from(get_config_path()).required(false),
        };

        let builder = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("GESTAO_AI")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        builder.try_deserialize()
    }

    pub fn groq_api_key(&self) -> Option<&str> {
        non_blank(self.api_keys.groq_api_key.as_deref())
    }

    pub fn together_api_key(&self) -> Option<&str> {
        non_blank(self.api_keys.together_api_key.as_deref())
    }

    /// Cache file location, or `None` when persistence is disabled
    pub fn cache_path(&self) -> Option<PathBuf> {
        if !self.cache.enabled {
            return None;
        }
        Some(self.cache.path.clone().unwrap_or_else(get_default_cache_path))
    }
}

impl ApiKeysConfig {
    /// Fill keys that are unset or blank from the given variable lookup
    pub fn fill_missing(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        fill_key(&mut self.groq_api_key, GROQ_KEY_VARS, &lookup);
        fill_key(&mut self.together_api_key, TOGETHER_KEY_VARS, &lookup);
    }
}

fn fill_key(
    slot: &mut Option<String>,
    vars: &[&str],
    lookup: &impl Fn(&str) -> Option<String>,
) {
    if non_blank(slot.as_deref()).is_some() {
        return;
    }
    *slot = vars
        .iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.trim().is_empty());
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("gestao-ai/config.toml")
    } else {
        PathBuf::from("gestao-ai.toml")
    }
}

fn get_default_cache_path() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        data_dir.join("gestao-ai/ai_chat_cache.json")
    } else {
        PathBuf::from("ai_chat_cache.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.providers.request_timeout_secs, 60);
        assert_eq!(config.providers.context_limit, 8);
        assert!(config.providers.free_tier_enabled);
        assert!(config.groq_api_key().is_none());
        assert!(config.cache_path().is_some());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[providers]
request_timeout_secs = 5
context_limit = 3
groq_base_url = "http://localhost:9999"

[api_keys]
groq_api_key = "from-file"
together_api_key = "   "

[cache]
enabled = false
"#,
        )
        .unwrap();

        let config = AppConfig::load_layers(Some(&path)).unwrap();
        assert_eq!(config.providers.request_timeout_secs, 5);
        assert_eq!(config.providers.context_limit, 3);
        assert!(config.providers.free_tier_enabled);
        assert_eq!(
            config.providers.groq_base_url.as_deref(),
            Some("http://localhost:9999")
        );
        assert_eq!(config.groq_api_key(), Some("from-file"));
        assert_eq!(config.together_api_key(), None);
        assert_eq!(config.cache_path(), None);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(AppConfig::load_layers(Some(&missing)).is_err());
    }

    #[test]
    fn test_fill_missing_prefers_configured_then_first_variable() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("GROQ_API_KEY", ""),
            ("VITE_GROQ_API_KEY", "vite-groq"),
            ("TOGETHER_API_KEY", "together-env"),
        ]);
        let lookup = |name: &str| env.get(name).map(|v| v.to_string());

        let mut keys = ApiKeysConfig::default();
        keys.fill_missing(lookup);
        assert_eq!(keys.groq_api_key.as_deref(), Some("vite-groq"));
        assert_eq!(keys.together_api_key.as_deref(), Some("together-env"));

        let mut configured = ApiKeysConfig {
            groq_api_key: Some("from-file".to_string()),
            together_api_key: None,
        };
        configured.fill_missing(|_| None);
        assert_eq!(configured.groq_api_key.as_deref(), Some("from-file"));
        assert_eq!(configured.together_api_key, None);
    }
}
