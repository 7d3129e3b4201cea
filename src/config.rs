use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub artifacts: ArtifactConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Fixed relative paths of the two artifacts, resolved once at startup.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ArtifactConfig {
    pub model_path: PathBuf,
    pub preprocessor_path: PathBuf,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("superkart_model.onnx"),
            preprocessor_path: PathBuf::from("superkart_preprocessor.json"),
        }
    }
}

impl AppConfig {
    /// Reads `SUPERKART_CONFIG` (or `config.yaml`) if present, then applies
    /// environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("SUPERKART_CONFIG")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

        let mut config = Self::from_file(Path::new(&path))?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// A missing file yields defaults; an unreadable or invalid one is an error.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed reading config {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("failed parsing config {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<()> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = non_empty("PORT") {
            self.server.port = v
                .trim()
                .parse()
                .with_context(|| format!("invalid PORT {v:?}"))?;
        }
        if let Some(v) = non_empty("HOST") {
            self.server.host = v;
        }
        if let Some(v) = non_empty("SUPERKART_MODEL_PATH") {
            self.artifacts.model_path = PathBuf::from(v);
        }
        if let Some(v) = non_empty("SUPERKART_PREPROCESSOR_PATH") {
            self.artifacts.preprocessor_path = PathBuf::from(v);
        }
        Ok(())
    }
}
