/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use setlist_core::Provider;
use setlist_provider_client::GatewayConfig;
use setlist_transfer::TransferLimits;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,

    #[serde(default)]
    pub transfer: TransferLimits,

    #[serde(default)]
    pub providers: ProviderSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub jwt_secret: String,

    #[serde(default = "default_jwt_expiration_hours")]
    pub jwt_expiration_hours: u64,
}

/// One gateway per provider; a provider without a gateway is not offered
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProviderSettings {
    #[serde(default)]
    pub soundcloud: Option<GatewaySettings>,

    #[serde(default)]
    pub spotify: Option<GatewaySettings>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewaySettings {
    pub base_url: String,

    #[serde(default)]
    pub access_token: Option<String>,

    #[serde(default = "default_gateway_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderSettings {
    /// Gateway client configurations for every configured provider
    pub fn gateways(&self) -> Vec<GatewayConfig> {
        [
            (Provider::Soundcloud, &self.soundcloud),
            (Provider::Spotify, &self.spotify),
        ]
        .into_iter()
        .filter_map(|(provider, settings)| {
            settings.as_ref().map(|s| {
                let config = GatewayConfig::new(provider, s.base_url.clone())
                    .with_timeout(Duration::from_secs(s.timeout_secs));
                match &s.access_token {
                    Some(token) => config.with_access_token(token.clone()),
                    None => config,
                }
            })
        })
        .collect()
    }
}

impl ServerConfig {
    /// Load configuration from file and environment.
    ///
    /// `path` defaults to `config.toml` in the working directory; a missing
    /// default file is not an error. Environment variables use the `SETLIST_`
    /// prefix and `__` between sections, e.g. `SETLIST_AUTH__JWT_SECRET`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = Path::new("config.toml");
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path.to_path_buf()));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("SETLIST")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(ServerError::Config(
                "JWT secret is required (set SETLIST_AUTH__JWT_SECRET)".to_string(),
            ));
        }

        self.transfer
            .validate()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        for gateway in self.providers.gateways() {
            if gateway.base_url.trim().is_empty() {
                return Err(ServerError::Config(format!(
                    "providers.{}.base_url must not be empty",
                    gateway.provider
                )));
            }
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/setlist.db".to_string()
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        jwt_secret: String::new(),
        jwt_expiration_hours: default_jwt_expiration_hours(),
    }
}

fn default_jwt_expiration_hours() -> u64 {
    24
}

fn default_gateway_timeout_secs() -> u64 {
    15
}
