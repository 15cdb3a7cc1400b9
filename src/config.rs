use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use serde::Deserialize;

const ENV_PREFIX: &str = "GMDB_";
const ENV_SEPARATOR: &str = "__";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub name: String,
    pub version: String,
    pub environment: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "gmdb".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "localhost".to_string(), port: 8080, request_timeout_secs: 30 }
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Full DSN; when set the discrete connection fields are ignored.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
    pub sslmode: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
    pub statement_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            dbname: "gmdb".to_string(),
            sslmode: "disable".to_string(),
            max_connections: 10,
            connect_timeout_secs: 10,
            statement_timeout_secs: 15,
        }
    }
}

impl DatabaseConfig {
    pub fn dsn(&self) -> String {
        if let Some(url) = self.url.as_deref().filter(|u| !u.trim().is_empty()) {
            return url.to_string();
        }
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode={}",
            urlencoding::encode(&self.user),
            urlencoding::encode(&self.password),
            self.host,
            self.port,
            self.dbname,
            self.sslmode,
        )
    }

    pub fn statement_timeout(&self) -> Duration {
        Duration::from_secs(self.statement_timeout_secs.max(1))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs.max(1))
    }
}

impl Config {
    /// Loads `.env`, then the YAML file named by `GMDB_CONFIG` (or
    /// `config.yaml`), then applies `GMDB_<SECTION>__<KEY>` overrides.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let explicit = std::env::var("GMDB_CONFIG").ok().map(PathBuf::from);
        let path = explicit.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        let yaml = match std::fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(err) if explicit.is_none() && err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                None
            }
            Err(err) => {
                return Err(err).with_context(|| format!("reading {}", path.display()));
            }
        };

        Self::from_sources(yaml.as_deref(), std::env::vars())
    }

    pub fn from_sources(
        yaml: Option<&str>,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> anyhow::Result<Self> {
        let mut config = match yaml {
            Some(text) if !text.trim().is_empty() => {
                serde_yaml::from_str(text).context("parsing config yaml")?
            }
            _ => Self::default(),
        };

        for (key, value) in vars {
            let Some(path) = key.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            if !path.contains(ENV_SEPARATOR) {
                continue;
            }
            config.apply_override(&path.to_ascii_lowercase(), value).context(key)?;
        }

        Ok(config)
    }

    fn apply_override(&mut self, path: &str, value: String) -> anyhow::Result<()> {
        match path {
            "app__name" => self.app.name = value,
            "app__version" => self.app.version = value,
            "app__environment" => self.app.environment = value,
            "server__host" => self.server.host = value,
            "server__port" => self.server.port = value.parse()?,
            "server__request_timeout_secs" => self.server.request_timeout_secs = value.parse()?,
            "database__url" => self.database.url = Some(value),
            "database__host" => self.database.host = value,
            "database__port" => self.database.port = value.parse()?,
            "database__user" => self.database.user = value,
            "database__password" => self.database.password = value,
            "database__dbname" => self.database.dbname = value,
            "database__sslmode" => self.database.sslmode = value,
            "database__max_connections" => self.database.max_connections = value.parse()?,
            "database__connect_timeout_secs" => {
                self.database.connect_timeout_secs = value.parse()?
            }
            "database__statement_timeout_secs" => {
                self.database.statement_timeout_secs = value.parse()?
            }
            other => tracing::debug!(key = other, "ignoring unknown config override"),
        }
        Ok(())
    }
}
