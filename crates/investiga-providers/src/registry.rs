//! Provider registry and failure-isolating dispatch.

use crate::error::Result;
use crate::provider::{LookupOptions, LookupProvider};
use crate::providers::{
    common::build_http_client, CepProvider, CltPisProvider, CnpjProvider, CpfProvider,
    DatajudProvider, DddProvider, DirectDataProvider, DuckDuckGoProvider, GithubProvider,
    HibpProvider, PhoneProvider, WikipediaProvider,
};
use investiga_core::{AppConfig, Provider, SearchItem};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Lookup providers indexed by [`Provider`].
///
/// Dispatch through [`ProviderRegistry::fetch`] never fails: any provider
/// error becomes a single sentinel item so one vendor cannot abort a search.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: Arc<HashMap<Provider, Arc<dyn LookupProvider>>>,
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.providers())
            .finish()
    }
}

impl ProviderRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider, replacing any previous one for the same key.
    pub fn register(&mut self, provider: Arc<dyn LookupProvider>) {
        let key = provider.provider();
        Arc::make_mut(&mut self.providers).insert(key, provider);
    }

    /// Builder form of [`ProviderRegistry::register`].
    #[must_use]
    pub fn with(mut self, provider: impl LookupProvider + 'static) -> Self {
        self.register(Arc::new(provider));
        self
    }

    /// Register every provider against its public endpoint, sharing one
    /// HTTP client.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client = build_http_client(
            Some(config.search.timeout_secs),
            &config.search.user_agent,
        )?;
        let providers = &config.providers;

        let registry = Self::new()
            .with(CpfProvider)
            .with(CnpjProvider::new(client.clone()))
            .with(CepProvider::new(client.clone()))
            .with(PhoneProvider)
            .with(DddProvider::new(client.clone()))
            .with(CltPisProvider)
            .with(DirectDataProvider::new(client.clone(), providers))
            .with(DatajudProvider::new(
                client.clone(),
                providers.datajud_tribunal.clone(),
                providers.datajud_api_key.clone(),
            ))
            .with(HibpProvider::new(client.clone(), providers.hibp_api_key.clone()))
            .with(DuckDuckGoProvider::new(client.clone()))
            .with(WikipediaProvider::new(
                client.clone(),
                providers.wikipedia_lang.clone(),
            ))
            .with(GithubProvider::new(client, providers.github_token.clone()));

        info!(count = registry.len(), "registered lookup providers");
        Ok(registry)
    }

    /// Get a provider by key.
    #[must_use]
    pub fn get(&self, provider: Provider) -> Option<Arc<dyn LookupProvider>> {
        self.providers.get(&provider).cloned()
    }

    /// Registered provider keys in canonical order.
    #[must_use]
    pub fn providers(&self) -> Vec<Provider> {
        let mut keys: Vec<Provider> = self.providers.keys().copied().collect();
        keys.sort();
        keys
    }

    /// Number of registered providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether no provider is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Query one provider. Errors are logged and returned as a sentinel
    /// item carrying the operator-facing message.
    pub async fn fetch(
        &self,
        provider: Provider,
        query: &str,
        options: &LookupOptions,
    ) -> Vec<SearchItem> {
        let Some(lookup) = self.get(provider) else {
            warn!(%provider, "provider not registered");
            return vec![SearchItem::vendor_error(
                provider,
                format!("{} não disponível", provider.display_name()),
            )];
        };

        match lookup.lookup(query.trim(), options).await {
            Ok(items) => {
                debug!(%provider, count = items.len(), "provider answered");
                items
            }
            Err(err) => {
                warn!(%provider, error = %err, "provider failed");
                vec![SearchItem::vendor_error(
                    provider,
                    err.sentinel_message(provider),
                )]
            }
        }
    }
}
