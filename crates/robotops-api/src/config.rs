use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
};

/// Service settings. Every field has a default, so a config file only needs
/// the keys it wants to change.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    pub host: IpAddr,
    pub port: u16,
    pub db_path: PathBuf,
    pub allowed_origins: Vec<String>,
    pub log_filter: String,
    pub pool_size: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8800,
            db_path: PathBuf::from("./var/robotops.db"),
            allowed_origins: vec!["http://localhost:3000".to_string()],
            log_filter: "info".to_string(),
            pool_size: 8,
        }
    }
}

/// Values given on the command line; `None`/empty leaves the loaded value alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    pub db_path: Option<PathBuf>,
    pub allowed_origins: Vec<String>,
    pub log_filter: Option<String>,
}

impl ApiConfig {
    /// Reads `explicit` when given (it must exist), otherwise the per-user
    /// default file if present, otherwise built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match default_config_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(host) = overrides.host {
            self.host = host;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(db_path) = overrides.db_path {
            self.db_path = db_path;
        }
        if !overrides.allowed_origins.is_empty() {
            self.allowed_origins = overrides.allowed_origins;
        }
        if let Some(log_filter) = overrides.log_filter {
            self.log_filter = log_filter;
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("robotops").join("api.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let config = ApiConfig::from_toml_str(
            r#"
            port = 9000
            allowed_origins = ["https://ops.example.com"]
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.allowed_origins, vec!["https://ops.example.com".to_string()]);
        assert_eq!(config.db_path, ApiConfig::default().db_path);
        assert_eq!(config.pool_size, 8);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(ApiConfig::from_toml_str("prot = 1").is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ApiConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }

    #[test]
    fn explicit_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.toml");
        fs::write(&path, "host = \"127.0.0.1\"\nlog_filter = \"debug\"\n").unwrap();

        let config = ApiConfig::load(Some(&path)).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:8800".parse::<SocketAddr>().unwrap());
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn command_line_values_win() {
        let mut config = ApiConfig::from_toml_str("port = 9000").unwrap();
        config.apply(Overrides {
            port: Some(9100),
            allowed_origins: vec!["http://localhost:5173".to_string()],
            ..Overrides::default()
        });

        assert_eq!(config.port, 9100);
        assert_eq!(config.allowed_origins, vec!["http://localhost:5173".to_string()]);
        assert_eq!(config.log_filter, "info");
    }
}
