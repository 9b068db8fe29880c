use super::minio_config::{MinioConfig, MinioSection};
use crate::processor::ClassifierSettings;
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Minio,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSection {
    pub backend: StoreBackend,
    #[serde(default = "default_collection")]
    pub collection: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub directory: String,
    pub currency_symbol: String,
    /// Also upload the rendered artifacts to the bucket (minio backend only).
    pub upload: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            directory: "reports".to_string(),
            currency_symbol: "₹".to_string(),
            upload: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub store: StoreSection,
    #[serde(default)]
    pub report: ClassifierSettings,
    #[serde(default)]
    pub output: OutputSection,
    pub minio: Option<MinioSection>,
}

fn default_collection() -> String {
    "reviews".to_string()
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::from_toml(&content).with_context(|| format!("Invalid config file: {}", path))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.store.collection.is_empty() {
            return Err(anyhow!("store.collection cannot be empty"));
        }

        if self.store.backend == StoreBackend::Minio && self.minio.is_none() {
            return Err(anyhow!("store.backend = \"minio\" requires a [minio] section"));
        }

        if self.report.negative_threshold >= self.report.positive_threshold {
            return Err(anyhow!(
                "report.negative_threshold ({}) must be below report.positive_threshold ({})",
                self.report.negative_threshold,
                self.report.positive_threshold
            ));
        }

        Ok(())
    }

    /// Resolves the `[minio]` section, pulling credentials from the environment.
    pub fn minio_config(&self) -> Result<MinioConfig> {
        let section = self
            .minio
            .clone()
            .ok_or_else(|| anyhow!("No [minio] section configured"))?;
        MinioConfig::from_section(section)
    }
}
