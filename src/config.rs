use crate::common::constants::{
    get_supported_apis, DEFAULT_USER_AGENT, KOMPASS_ENDPOINT, PALMARIUM_ENDPOINT,
    WINTERCIRCUS_ENDPOINT,
};
use crate::common::error::{Result, ScraperError};
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const CONFIG_PATH_ENV: &str = "NACHTLEVEN_CONFIG";
pub const PORT_ENV: &str = "PORT";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub http: HttpConfig,
    pub providers: ProvidersConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub enabled: Vec<String>,
    pub palmarium_endpoint: String,
    pub wintercircus_endpoint: String,
    pub kompass_endpoint: String,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            enabled: get_supported_apis().into_iter().map(String::from).collect(),
            palmarium_endpoint: PALMARIUM_ENDPOINT.to_string(),
            wintercircus_endpoint: WINTERCIRCUS_ENDPOINT.to_string(),
            kompass_endpoint: KOMPASS_ENDPOINT.to_string(),
        }
    }
}

/// Load `.env` from the working directory (or `path`) into the process
/// environment. Existing variables win. Returns the file that was loaded.
pub fn load_env_file(path: Option<&Path>) -> Option<PathBuf> {
    match path {
        Some(path) => dotenv::from_path(path).ok().map(|_| path.to_path_buf()),
        None => dotenv::dotenv().ok(),
    }
}

impl Config {
    /// Load the config file (explicit path, `NACHTLEVEN_CONFIG`, or
    /// `config.toml`), then apply the `PORT` override. Call [`load_env_file`]
    /// first so values from `.env` are visible.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => std::env::var(CONFIG_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH)),
        };

        let mut config = Self::from_path(&path)?;
        config.apply_port_override(std::env::var(PORT_ENV).ok().as_deref())?;
        Ok(config)
    }

    /// Read a TOML config file; a missing file yields the defaults
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config file at '{}', using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            ScraperError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!("Loaded config from '{}': {:?}", path.display(), config);
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.socket_addr()?;
        if self.server.request_timeout_secs == 0 {
            return Err(ScraperError::Config(
                "server.request_timeout_secs must be greater than zero".into(),
            ));
        }
        if self.http.timeout_secs == 0 {
            return Err(ScraperError::Config(
                "http.timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Replace the port of `server.addr` when `port` is set
    pub fn apply_port_override(&mut self, port: Option<&str>) -> Result<()> {
        let Some(port) = port else {
            return Ok(());
        };
        let port: u16 = port
            .trim()
            .parse()
            .map_err(|e| ScraperError::Config(format!("PORT must be a valid number: {e}")))?;

        let mut addr = self.socket_addr()?;
        addr.set_port(port);
        self.server.addr = addr.to_string();
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.server.addr.parse().map_err(|e| {
            ScraperError::Config(format!(
                "Invalid server address '{}': {}",
                self.server.addr, e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.addr, "0.0.0.0:8080");
        assert_eq!(config.server.request_timeout_secs, 15);
        assert_eq!(
            config.providers.enabled,
            vec!["palmarium", "wintercircus", "kompass"]
        );
        assert_eq!(config.providers.kompass_endpoint, KOMPASS_ENDPOINT);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [providers]
            enabled = ["kompass"]
            kompass_endpoint = "http://127.0.0.1:9000/event-list/"
            "#,
        )
        .unwrap();

        assert_eq!(config.providers.enabled, vec!["kompass"]);
        assert_eq!(
            config.providers.kompass_endpoint,
            "http://127.0.0.1:9000/event-list/"
        );
        assert_eq!(config.providers.palmarium_endpoint, PALMARIUM_ENDPOINT);
        assert_eq!(config.server.addr, "0.0.0.0:8080");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            Config::from_toml_str("[server]\naddr = \"not an address\""),
            Err(ScraperError::Config(_))
        ));
        assert!(matches!(
            Config::from_toml_str("[http]\ntimeout_secs = 0"),
            Err(ScraperError::Config(_))
        ));
        assert!(matches!(
            Config::from_toml_str("[server\naddr ="),
            Err(ScraperError::Toml(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[server]\naddr = \"127.0.0.1:3000\"").unwrap();

        let config = Config::from_path(file.path()).unwrap();
        assert_eq!(config.server.addr, "127.0.0.1:3000");
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_path(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.addr, "0.0.0.0:8080");
    }

    #[test]
    fn test_load_env_file_exports_variables() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "NACHTLEVEN_TEST_ENV_FILE_LEVEL=nachtleven=trace").unwrap();

        let loaded = load_env_file(Some(file.path()));
        assert_eq!(loaded.as_deref(), Some(file.path()));
        assert_eq!(
            std::env::var("NACHTLEVEN_TEST_ENV_FILE_LEVEL").unwrap(),
            "nachtleven=trace"
        );
    }

    #[test]
    fn test_load_env_file_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_env_file(Some(&dir.path().join(".env"))).is_none());
    }

    #[test]
    fn test_port_override() {
        let mut config = Config::default();
        config.apply_port_override(Some("9090")).unwrap();
        assert_eq!(config.server.addr, "0.0.0.0:9090");

        config.apply_port_override(None).unwrap();
        assert_eq!(config.server.addr, "0.0.0.0:9090");

        assert!(config.apply_port_override(Some("eighty")).is_err());
    }
}
