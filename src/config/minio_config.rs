use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::env;

/// The `[minio]` table of the application config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinioSection {
    pub endpoint: String,
    pub bucket_name: String,
    pub region: Option<String>,
    pub path_style: Option<bool>,
    // Names of the environment variables holding the credentials
    pub env_access_key: Option<String>,
    pub env_secret_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MinioConfig {
    pub endpoint: String,
    pub bucket_name: String,
    pub region: Option<String>,
    pub path_style: Option<bool>,
    // Loaded from the environment, never from the file
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub env_access_key: Option<String>,
    pub env_secret_key: Option<String>,
}

impl MinioConfig {
    /// Builds the config from its TOML section and reads credentials from the environment.
    pub fn from_section(section: MinioSection) -> Result<Self> {
        let mut config = Self {
            endpoint: section.endpoint,
            bucket_name: section.bucket_name,
            region: section.region,
            path_style: section.path_style,
            access_key: None,
            secret_key: None,
            env_access_key: section.env_access_key,
            env_secret_key: section.env_secret_key,
        };
        config.load_credentials()?;
        Ok(config)
    }

    pub fn load_credentials(&mut self) -> Result<()> {
        let access_var = self.env_access_key.as_deref().unwrap_or("MINIO_ACCESS_KEY");
        let secret_var = self.env_secret_key.as_deref().unwrap_or("MINIO_SECRET_KEY");

        let access_key = read_env(access_var)?;
        let secret_key = read_env(secret_var)?;
        self.access_key = Some(access_key);
        self.secret_key = Some(secret_key);
        Ok(())
    }

    /// `(access_key, secret_key)`, once both have been loaded.
    pub fn credentials(&self) -> Result<(&str, &str)> {
        match (self.access_key.as_deref(), self.secret_key.as_deref()) {
            (Some(access), Some(secret)) => Ok((access, secret)),
            _ => Err(anyhow!("MinIO credentials not loaded")),
        }
    }

    pub fn is_path_style(&self) -> bool {
        self.path_style.unwrap_or(true)
    }

    pub fn get_region(&self) -> &str {
        self.region.as_deref().unwrap_or("us-east-1")
    }

    pub fn validate(&self) -> Result<()> {
        if self.endpoint.is_empty() {
            return Err(anyhow!("MinIO endpoint cannot be empty"));
        }

        if self.bucket_name.is_empty() {
            return Err(anyhow!("MinIO bucket name cannot be empty"));
        }

        self.credentials().map(|_| ())
    }
}

fn read_env(var: &str) -> Result<String> {
    env::var(var).with_context(|| format!("Missing environment variable: {}", var))
}

impl Default for MinioConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:9000".to_string(),
            bucket_name: "review-reports".to_string(),
            region: Some("us-east-1".to_string()),
            path_style: Some(true),
            access_key: None,
            secret_key: None,
            env_access_key: None,
            env_secret_key: None,
        }
    }
}
