use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::engine::EngineConfig;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct MemoriaConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub engine: EngineConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible API.
    pub api_base: String,
    /// API key. Empty or `"demo-key"` disables the remote path entirely and
    /// every reply comes from the local engine.
    pub api_key: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct UploadConfig {
    /// Maximum accepted photo upload, in bytes.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 5173,
            log_level: "info".into(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".into(),
            api_key: String::new(),
            model: "gpt-4o".into(),
            temperature: 0.7,
            max_tokens: 300,
            timeout_secs: 30,
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: 50 * 1024 * 1024,
        }
    }
}

/// Returns `~/.memoria/`
pub fn default_memoria_dir() -> PathBuf {
    dirs::home_dir()
        .expect("home directory must exist")
        .join(".memoria")
}

/// Returns the default config file path: `~/.memoria/config.toml`
pub fn default_config_path() -> PathBuf {
    default_memoria_dir().join("config.toml")
}

impl MemoriaConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            MemoriaConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (MEMORIA_HOST, MEMORIA_PORT,
    /// MEMORIA_LOG_LEVEL, OPENAI_API_KEY).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("MEMORIA_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("MEMORIA_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("MEMORIA_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("OPENAI_API_KEY") {
            self.llm.api_key = val;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = MemoriaConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.log_level, "info");
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.llm.max_tokens, 300);
        assert_eq!(config.engine.short_message_len, 20);
        assert_eq!(config.engine.fallback_name, "Companion");
        assert_eq!(config.upload.max_upload_bytes, 50 * 1024 * 1024);
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[server]
port = 8080
log_level = "debug"

[llm]
model = "gpt-4o-mini"

[engine]
personalization_probability = 0.5
"#;
        let config: MemoriaConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.log_level, "debug");
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.engine.personalization_probability, 0.5);
        // defaults still apply for unset fields
        assert_eq!(config.engine.short_question_probability, 0.7);
        assert_eq!(config.llm.temperature, 0.7);
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = MemoriaConfig::default();
        std::env::set_var("MEMORIA_HOST", "0.0.0.0");
        std::env::set_var("MEMORIA_PORT", "9999");
        std::env::set_var("MEMORIA_LOG_LEVEL", "trace");

        config.apply_env_overrides();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.server.log_level, "trace");

        // Clean up
        std::env::remove_var("MEMORIA_HOST");
        std::env::remove_var("MEMORIA_PORT");
        std::env::remove_var("MEMORIA_LOG_LEVEL");
    }
}
