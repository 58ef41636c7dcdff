use std::path::PathBuf;
use serde::Deserialize;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::RepositoryStore;

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "BOOKS_ENV";
const CONFIG_DIR_ENV: &str = "BOOKS_CONFIG_DIR";

// ServerMode selects how the router is hosted
#[derive(Debug, PartialEq, Deserialize, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ServerMode {
    #[default]
    Http,
    Lambda,
}

#[derive(Debug, PartialEq, Deserialize, Clone)]
pub(crate) struct ServerSettings {
    #[serde(default)]
    pub mode: ServerMode,
    #[serde(default = "ServerSettings::default_host")]
    pub host: String,
    #[serde(default = "ServerSettings::default_port")]
    pub port: u16,
}

impl ServerSettings {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        8080
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            mode: ServerMode::default(),
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

// AuthSettings holds the single credential pair accepted by basic authentication
#[derive(Debug, PartialEq, Deserialize, Clone)]
pub(crate) struct AuthSettings {
    #[serde(default = "AuthSettings::default_username")]
    pub username: String,
    #[serde(default = "AuthSettings::default_password")]
    pub password: String,
}

impl AuthSettings {
    fn default_username() -> String {
        "admin".to_string()
    }

    fn default_password() -> String {
        "password".to_string()
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            username: Self::default_username(),
            password: Self::default_password(),
        }
    }
}

#[derive(Debug, PartialEq, Deserialize, Clone)]
pub(crate) struct BookSettings {
    // answer 404 instead of 204 when deleting an unknown id
    #[serde(default = "default_true")]
    pub report_missing_on_delete: bool,
}

impl Default for BookSettings {
    fn default() -> Self {
        Self {
            report_missing_on_delete: true,
        }
    }
}

#[derive(Debug, PartialEq, Deserialize, Clone)]
pub(crate) struct HttpSettings {
    #[serde(default = "HttpSettings::default_powered_by")]
    pub powered_by: String,
    #[serde(default = "default_true")]
    pub compression: bool,
}

impl HttpSettings {
    fn default_powered_by() -> String {
        "Axum Framework".to_string()
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            powered_by: Self::default_powered_by(),
            compression: true,
        }
    }
}

#[derive(Debug, PartialEq, Deserialize, Clone)]
pub(crate) struct LogSettings {
    #[serde(default = "LogSettings::default_level")]
    pub level: String,
    #[serde(default = "default_true")]
    pub json: bool,
}

impl LogSettings {
    fn default_level() -> String {
        "info".to_string()
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: true,
        }
    }
}

fn default_true() -> bool {
    true
}

// Configuration abstracts config options for the books catalog
#[derive(Debug, PartialEq, Deserialize, Clone, Default)]
pub(crate) struct Configuration {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub store: RepositoryStore,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub books: BookSettings,
    #[serde(default)]
    pub http: HttpSettings,
    #[serde(default)]
    pub log: LogSettings,
}

impl Configuration {
    pub fn new(store: RepositoryStore) -> Self {
        Configuration {
            store,
            ..Default::default()
        }
    }

    // Layers `.env`, config/default.toml, config/<BOOKS_ENV>.toml and BOOKS_* variables.
    pub fn load() -> LibraryResult<Self> {
        let _ = dotenvy::dotenv();

        let environment = std::env::var(ENV_VAR_NAME).unwrap_or_else(|_| DEFAULT_ENV.to_string());
        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config"));

        let builder = config::Config::builder()
            .add_source(config::File::from(config_dir.join("default.toml")).required(false))
            .add_source(config::File::from(config_dir.join(format!("{}.toml", environment))).required(false))
            .add_source(config::Environment::with_prefix("BOOKS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true));

        builder.build()
            .and_then(|cfg| cfg.try_deserialize::<Configuration>())
            .map_err(|err| LibraryError::runtime(
                format!("failed to load configuration for {} due to {}", environment, err).as_str(), None))
    }
}
