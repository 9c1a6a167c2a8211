/// Shared application state
use crate::config::ServerConfig;
use crate::error::{Result, ServerError};
use crate::services::AuthService;
use setlist_core::PlaylistDirectory;
use setlist_provider_client::GatewayProvider;
use setlist_storage::SqlitePlaylistDirectory;
use setlist_transfer::{CounterpartyResolver, ProviderRegistry, TransferLimits, TransferService};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub transfers: Arc<TransferService>,
    pub counterparties: Arc<CounterpartyResolver>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(
        providers: ProviderRegistry,
        directory: Arc<dyn PlaylistDirectory>,
        limits: TransferLimits,
        auth_service: Arc<AuthService>,
    ) -> Self {
        Self {
            transfers: Arc::new(TransferService::new(
                providers.clone(),
                Arc::clone(&directory),
                limits,
            )),
            counterparties: Arc::new(CounterpartyResolver::new(providers, directory, limits)),
            auth_service,
        }
    }

    /// Wire the SQLite directory and the configured provider gateways
    pub async fn from_config(config: &ServerConfig) -> Result<Self> {
        let pool = setlist_storage::create_pool(&config.storage.database_url).await?;
        setlist_storage::run_migrations(&pool).await?;
        tracing::info!("Database connected");

        let mut providers = ProviderRegistry::new();
        for gateway in config.providers.gateways() {
            let provider = gateway.provider;
            let base_url = gateway.base_url.clone();
            let client = GatewayProvider::new(gateway).map_err(|e| {
                ServerError::Config(format!("providers.{provider}: {e}"))
            })?;
            providers.register(Arc::new(client));
            tracing::info!(%provider, %base_url, "Provider gateway configured");
        }
        if providers.is_empty() {
            tracing::warn!("No provider gateways configured; every transfer will be rejected");
        }

        let auth_service = Arc::new(AuthService::new(
            config.auth.jwt_secret.clone(),
            config.auth.jwt_expiration_hours,
        ));

        Ok(Self::new(
            providers,
            Arc::new(SqlitePlaylistDirectory::new(pool)),
            config.transfer,
            auth_service,
        ))
    }
}
