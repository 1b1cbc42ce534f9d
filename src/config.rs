use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use crate::storage::{FileProjectStore, InMemoryProjectStore, ProjectStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    File,
}

impl StoreBackend {
    fn from_env(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" | "in-memory" => Ok(Self::Memory),
            "file" | "json" => Ok(Self::File),
            _ => Err(anyhow::anyhow!("STORE_BACKEND must be one of: memory, file")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store_backend: StoreBackend,
    pub store_path: PathBuf,
    pub cors_permissive: bool,
}

impl AppConfig {
    /// Reads the process environment, after loading `.env` if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = lookup("APP_PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse::<u16>()
            .context("APP_PORT must be a valid u16")?;

        let store_backend =
            StoreBackend::from_env(&lookup("STORE_BACKEND").unwrap_or_else(|| "memory".to_string()))?;

        let store_path = lookup("STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data/projects.json"));

        let cors_permissive = match lookup("APP_CORS_PERMISSIVE") {
            Some(raw) => parse_bool(&raw).context("APP_CORS_PERMISSIVE must be true or false")?,
            None => false,
        };

        Ok(Self {
            host,
            port,
            store_backend,
            store_path,
            cors_permissive,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn open_store(&self) -> Result<Arc<dyn ProjectStore>> {
        let store: Arc<dyn ProjectStore> = match self.store_backend {
            StoreBackend::Memory => Arc::new(InMemoryProjectStore::new()),
            StoreBackend::File => Arc::new(
                FileProjectStore::open(&self.store_path).with_context(|| {
                    format!("failed to open project store at {}", self.store_path.display())
                })?,
            ),
        };
        Ok(store)
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow::anyhow!("not a boolean: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.address(), "0.0.0.0:8080");
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.store_path, PathBuf::from("data/projects.json"));
        assert!(!config.cors_permissive);
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("APP_HOST", "127.0.0.1"),
            ("APP_PORT", "9000"),
            ("STORE_BACKEND", "File"),
            ("STORE_PATH", "/tmp/p.json"),
            ("APP_CORS_PERMISSIVE", "yes"),
        ])
        .unwrap();
        assert_eq!(config.address(), "127.0.0.1:9000");
        assert_eq!(config.store_backend, StoreBackend::File);
        assert_eq!(config.store_path, PathBuf::from("/tmp/p.json"));
        assert!(config.cors_permissive);
    }

    #[test]
    fn invalid_values_are_errors() {
        assert!(config(&[("APP_PORT", "http")]).is_err());
        assert!(config(&[("STORE_BACKEND", "postgres")]).is_err());
        assert!(config(&[("APP_CORS_PERMISSIVE", "maybe")]).is_err());
    }
}
