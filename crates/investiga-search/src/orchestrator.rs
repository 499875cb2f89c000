//! Search orchestrator.
//!
//! Runs one search for a [`Subject`]: fields are processed in order, the
//! providers of a field run concurrently and are joined before the next
//! field starts. After every field has answered, identifiers found in the
//! phone results are enriched, then the whole result set is cross-referenced.

use crate::error::{Result, SearchError};
use crate::routing::{normalize_field_value, provider_query, providers_for_field};
use futures::future::join_all;
use investiga_core::{AppConfig, Provider, ResultSet, SearchItem, Subject, SubjectField};
use investiga_cross::{CrossEngine, CrossReport, Extractor, IdentifierKind, Identifiers};
use investiga_providers::{LookupOptions, ProviderRegistry};
use serde::Serialize;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Everything one search produced.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    /// Subject as searched
    pub subject: Subject,
    /// Items per field and provider
    pub results: ResultSet,
    /// Cross-reference groups and membership
    pub report: CrossReport,
}

/// Coordinates provider dispatch for a subject.
#[derive(Debug, Clone)]
pub struct SearchOrchestrator {
    registry: Arc<ProviderRegistry>,
    config: AppConfig,
}

impl SearchOrchestrator {
    /// Create an orchestrator over an existing registry.
    #[must_use]
    pub fn new(registry: ProviderRegistry, config: AppConfig) -> Self {
        Self {
            registry: Arc::new(registry),
            config,
        }
    }

    /// Validate the configuration and register every provider from it.
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn from_config(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let registry = ProviderRegistry::from_config(&config)?;
        Ok(Self::new(registry, config))
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Provider registry.
    #[must_use]
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Run a full search.
    ///
    /// # Errors
    /// Returns [`SearchError::EmptySubject`] when no field has a value and
    /// [`SearchError::Cancelled`] as soon as `cancel` fires. Provider
    /// failures never abort the search.
    pub async fn search(
        &self,
        subject: &Subject,
        cancel: &CancellationToken,
    ) -> Result<SearchOutcome> {
        if subject.is_empty() {
            return Err(SearchError::EmptySubject);
        }
        info!(fields = subject.present_fields().count(), "starting search");

        let mut results = ResultSet::new();
        for (field, raw) in subject.present_fields() {
            let Some(value) = normalize_field_value(field, raw) else {
                debug!(%field, "field has no usable value, skipping");
                continue;
            };
            let batch = self.search_field(field, &value, cancel).await?;
            for (provider, items) in batch {
                results.insert(field, provider, items);
            }
        }

        if self.config.search.auto_enrichment {
            self.enrich(&mut results, cancel).await?;
        }

        let report = CrossEngine::new(&self.config.cross).run(&results);
        info!(
            items = results.item_count(),
            groups = report.groups.len(),
            "search finished"
        );

        Ok(SearchOutcome {
            subject: subject.clone(),
            results,
            report,
        })
    }

    /// Query every provider routed for one field concurrently.
    ///
    /// # Errors
    /// Returns [`SearchError::Cancelled`] if `cancel` fires first.
    pub async fn search_field(
        &self,
        field: SubjectField,
        value: &str,
        cancel: &CancellationToken,
    ) -> Result<BTreeMap<Provider, Vec<SearchItem>>> {
        let providers = providers_for_field(field, value, &self.config.search);
        if providers.is_empty() {
            debug!(%field, "no providers enabled for field");
            return Ok(BTreeMap::new());
        }
        debug!(%field, ?providers, "querying providers");

        let options = LookupOptions::for_field(field)
            .with_max_items(self.config.search.max_items_per_provider);
        let lookups = providers.iter().map(|&provider| {
            let query = provider_query(field, provider, value, &self.config.search);
            async move {
                let items = self.registry.fetch(provider, &query, &options).await;
                (provider, items)
            }
        });

        let batch = cancellable(cancel, join_all(lookups)).await?;
        Ok(batch.into_iter().collect())
    }

    /// Look up CPFs and CEPs found in the `celular` results and append the
    /// answers to `results[cpf][cpf]` and `results[cep][cep]`.
    async fn enrich(&self, results: &mut ResultSet, cancel: &CancellationToken) -> Result<()> {
        let Some(phone_results) = results.field(SubjectField::Celular) else {
            return Ok(());
        };

        let extractor = Extractor::new(&self.config.cross);
        let mut found = Identifiers::new();
        for item in phone_results.values().flatten() {
            for (kind, value) in extractor.extract(item).iter() {
                if matches!(kind, IdentifierKind::Cpf | IdentifierKind::Cep) {
                    found.push(kind, value);
                }
            }
        }

        let limit = self.config.search.enrichment_limit;
        let targets = [
            (IdentifierKind::Cpf, SubjectField::Cpf, Provider::Cpf),
            (IdentifierKind::Cep, SubjectField::Cep, Provider::Cep),
        ];
        for (kind, field, provider) in targets {
            if !self.config.search.is_enabled(provider) {
                continue;
            }
            let values: Vec<&str> = found.values(kind).take(limit).collect();
            if values.is_empty() {
                continue;
            }
            debug!(%provider, count = values.len(), "enriching from phone results");

            let options = LookupOptions::for_field(field)
                .with_max_items(self.config.search.max_items_per_provider);
            let lookups = values
                .iter()
                .map(|value| self.registry.fetch(provider, value, &options));
            let answers = cancellable(cancel, join_all(lookups)).await?;
            results.extend(field, provider, answers.into_iter().flatten());
        }
        Ok(())
    }
}

/// Await `work` unless `cancel` fires first.
async fn cancellable<T>(cancel: &CancellationToken, work: impl Future<Output = T>) -> Result<T> {
    if cancel.is_cancelled() {
        return Err(SearchError::Cancelled);
    }
    tokio::select! {
        biased;
        () = cancel.cancelled() => {
            debug!("search cancelled");
            Err(SearchError::Cancelled)
        }
        output = work => Ok(output),
    }
}
