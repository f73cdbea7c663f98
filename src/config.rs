use anyhow::Context;
use serde::{Deserialize, Serialize};

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gemini: GeminiSettings,
    pub server: ServerSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    pub api_key: String,
    pub api_base: String,
    /// Model used for text-only reviews.
    pub model: String,
    /// Model used for screenshot reviews.
    pub vision_model: String,
    pub temperature: Option<f64>,
    pub max_output_tokens: Option<u32>,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.0-flash".to_string(),
            vision_model: "gemini-2.5-flash".to_string(),
            temperature: None,
            max_output_tokens: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Where the last uploaded screenshot is written; nothing is saved when unset.
    pub screenshot_path: Option<String>,
    pub max_upload_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            screenshot_path: None,
            max_upload_bytes: 20 * 1024 * 1024,
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("failed to parse config file {}", path))?;
        Ok(config.with_api_key_fallback(std::env::var(API_KEY_ENV).ok()))
    }

    /// Reads `path` when given, otherwise starts from defaults. Either way an
    /// empty API key is filled from the environment.
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Config::default().with_api_key_fallback(std::env::var(API_KEY_ENV).ok())),
        }
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    pub fn with_api_key_fallback(mut self, env_key: Option<String>) -> Self {
        if self.gemini.api_key.trim().is_empty() {
            if let Some(key) = env_key.filter(|k| !k.trim().is_empty()) {
                self.gemini.api_key = key.trim().to_string();
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = Config::from_yaml("gemini:\n  model: gemini-1.5-pro\n").unwrap();
        assert_eq!(config.gemini.model, "gemini-1.5-pro");
        assert_eq!(config.gemini.vision_model, "gemini-2.5-flash");
        assert_eq!(
            config.gemini.api_base,
            "https://generativelanguage.googleapis.com/v1beta"
        );
        assert!(config.server.screenshot_path.is_none());
        assert_eq!(config.server.max_upload_bytes, 20 * 1024 * 1024);
        assert!(config.gemini.temperature.is_none());
        assert!(config.gemini.max_output_tokens.is_none());
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r#"
gemini:
  api_key: abc
  api_base: http://localhost:9000/v1beta/
  model: m1
  vision_model: m2
  temperature: 0.4
  max_output_tokens: 4096
server:
  screenshot_path: /tmp/shot.png
  max_upload_bytes: 1024
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.gemini.api_key, "abc");
        assert_eq!(config.gemini.api_base, "http://localhost:9000/v1beta/");
        assert_eq!(config.gemini.vision_model, "m2");
        assert_eq!(config.gemini.temperature, Some(0.4));
        assert_eq!(config.gemini.max_output_tokens, Some(4096));
        assert_eq!(config.server.screenshot_path.as_deref(), Some("/tmp/shot.png"));
        assert_eq!(config.server.max_upload_bytes, 1024);
    }

    #[test]
    fn test_api_key_fallback_only_when_empty() {
        let config = Config::default().with_api_key_fallback(Some("from-env".to_string()));
        assert_eq!(config.gemini.api_key, "from-env");

        let mut config = Config::default();
        config.gemini.api_key = "from-file".to_string();
        let config = config.with_api_key_fallback(Some("from-env".to_string()));
        assert_eq!(config.gemini.api_key, "from-file");

        let config = Config::default().with_api_key_fallback(Some("  ".to_string()));
        assert!(config.gemini.api_key.is_empty());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "gemini:\n  api_key: file-key\n  model: m").unwrap();
        let config = Config::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.gemini.api_key, "file-key");
        assert_eq!(config.gemini.model, "m");
    }

    #[test]
    fn test_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        assert!(Config::from_file(path.to_str().unwrap()).is_err());
    }
}
