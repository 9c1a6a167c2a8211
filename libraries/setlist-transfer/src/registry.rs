use setlist_core::{MusicProvider, Provider, Result, TransferError};
use std::collections::HashMap;
use std::sync::Arc;

/// Provider clients keyed by the namespace they serve
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    clients: HashMap<Provider, Arc<dyn MusicProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a client, replacing any earlier client for the same provider
    pub fn register(&mut self, client: Arc<dyn MusicProvider>) {
        self.clients.insert(client.provider(), client);
    }

    #[must_use]
    pub fn with(mut self, client: Arc<dyn MusicProvider>) -> Self {
        self.register(client);
        self
    }

    pub fn get(&self, provider: Provider) -> Result<Arc<dyn MusicProvider>> {
        self.clients.get(&provider).cloned().ok_or_else(|| {
            TransferError::invalid_reference(format!("provider '{provider}' is not configured"))
        })
    }

    /// Configured providers, in a stable order
    pub fn providers(&self) -> Vec<Provider> {
        let mut providers: Vec<Provider> = self.clients.keys().copied().collect();
        providers.sort();
        providers
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.providers())
            .finish()
    }
}
