//! Runtime configuration.
//!
//! Read from an optional TOML file, then overridden by environment variables.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{TruthLensError, TruthLensResult};
use crate::tool::model::ToolKind;

/// Default remote model: a fast general-purpose multimodal model.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default Gemini API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_MODEL: &str = "TRUTHLENS_MODEL";
pub const ENV_IMAGE_MODEL: &str = "TRUTHLENS_IMAGE_MODEL";
pub const ENV_BASE_URL: &str = "TRUTHLENS_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "TRUTHLENS_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TruthLensConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub image_model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for TruthLensConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            image_model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl TruthLensConfig {
    /// `<config dir>/truthlens/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("truthlens").join("config.toml"))
    }

    pub fn from_toml_str(content: &str) -> TruthLensResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> TruthLensResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load configuration and apply environment overrides.
    ///
    /// An explicit path must exist; the default path is optional.
    pub fn load(path: Option<&Path>) -> TruthLensResult<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(default) if default.exists() => Self::from_file(&default)?,
                _ => Self::default(),
            },
        };
        config.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production). Empty values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> TruthLensResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(model) = get(ENV_MODEL) {
            self.model = model;
        }
        if let Some(model) = get(ENV_IMAGE_MODEL) {
            self.image_model = model;
        }
        if let Some(url) = get(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(secs) = get(ENV_TIMEOUT_SECS) {
            self.timeout_secs = secs.trim().parse().map_err(|_| {
                TruthLensError::config(format!("{} must be a whole number of seconds, got '{}'", ENV_TIMEOUT_SECS, secs))
            })?;
        }

        Ok(self)
    }

    /// The provider credential, or a configuration error naming how to set it.
    pub fn require_api_key(&self) -> TruthLensResult<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                TruthLensError::config(format!(
                    "{} is not set. Set it with: export {}=your-key",
                    ENV_API_KEY, ENV_API_KEY
                ))
            })
    }

    /// The credential with all but its last four characters hidden. Short
    /// credentials are hidden entirely.
    pub fn masked_api_key(&self) -> String {
        match self.api_key.as_deref() {
            None | Some("") => "(not set)".to_string(),
            Some(key) => {
                let chars: Vec<char> = key.chars().collect();
                if chars.len() <= 8 {
                    return "*".repeat(chars.len());
                }
                let visible = chars.len() - 4;
                let tail: String = chars[visible..].iter().collect();
                format!("{}{}", "*".repeat(visible.min(12)), tail)
            }
        }
    }

    pub fn models(&self) -> ModelSelection {
        ModelSelection {
            text: self.model.clone(),
            image: self.image_model.clone(),
        }
    }
}

/// Which remote model each kind of tool calls by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSelection {
    pub text: String,
    pub image: String,
}

impl Default for ModelSelection {
    fn default() -> Self {
        Self {
            text: DEFAULT_MODEL.to_string(),
            image: DEFAULT_MODEL.to_string(),
        }
    }
}

impl ModelSelection {
    /// Default model for a tool.
    pub fn for_tool(&self, tool: ToolKind) -> &str {
        match tool {
            ToolKind::ImageAuthenticity => &self.image,
            _ => &self.text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = TruthLensConfig::default();
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.image_model, "gemini-1.5-flash");
        assert_eq!(config.timeout_secs, 120);
        assert!(config.require_api_key().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = TruthLensConfig::from_toml_str("image_model = \"gemini-1.5-pro\"\n").unwrap();
        assert_eq!(config.image_model, "gemini-1.5-pro");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(matches!(
            TruthLensConfig::from_toml_str("timeout_secs = \"soon\""),
            Err(TruthLensError::Toml(_))
        ));
    }

    #[test]
    fn test_environment_overrides_file() {
        let config = TruthLensConfig::from_toml_str("model = \"from-file\"\napi_key = \"file-key\"")
            .unwrap()
            .with_overrides(env(&[
                (ENV_MODEL, "from-env"),
                (ENV_API_KEY, ""),
                (ENV_TIMEOUT_SECS, "30"),
            ]))
            .unwrap();
        assert_eq!(config.model, "from-env");
        assert_eq!(config.api_key.as_deref(), Some("file-key"));
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_bad_timeout_override() {
        let err = TruthLensConfig::default()
            .with_overrides(env(&[(ENV_TIMEOUT_SECS, "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_TIMEOUT_SECS));
    }

    #[test]
    fn test_masked_api_key() {
        let mut config = TruthLensConfig::default();
        assert_eq!(config.masked_api_key(), "(not set)");
        config.api_key = Some("AIzaSecretKey1234".into());
        assert_eq!(config.masked_api_key(), "************1234");
        config.api_key = Some("abc".into());
        assert_eq!(config.masked_api_key(), "***");
    }

    #[test]
    fn test_model_selection_per_tool() {
        let config = TruthLensConfig {
            image_model: "vision".into(),
            ..Default::default()
        };
        let models = config.models();
        assert_eq!(models.for_tool(ToolKind::ImageAuthenticity), "vision");
        assert_eq!(models.for_tool(ToolKind::BiasAnalysis), DEFAULT_MODEL);
    }
}
