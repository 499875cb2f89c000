//! Configuration management for Investiga.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides. API credentials are never written to the
//! config file; they are read from the environment on load.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Provider;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration.
///
/// This is loaded from `~/.config/investiga/config.toml` (or platform
/// equivalent). If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Search orchestration settings
    pub search: SearchConfig,
    /// Cross-reference settings
    pub cross: CrossConfig,
    /// Provider endpoints and credentials
    pub providers: ProvidersConfig,
    /// Export settings
    pub export: ExportConfig,
    /// Investigation history database
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific file, falling back to defaults if
    /// it does not exist.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            let contents = fs::read_to_string(path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `INVESTIGA_TIMEOUT_SECS`: HTTP timeout per provider call
    /// - `INVESTIGA_AUTO_ENRICHMENT`: follow-up CPF/CEP lookups (true/false)
    /// - `INVESTIGA_EXTRACT_NAMES`: mine names from free text (true/false)
    /// - `INVESTIGA_DB_PATH`: history database location
    /// - `DIRECT_DATA_BASE_URL`, `DIRECT_DATA_AUTH_HEADER`, `DIRECT_DATA_AUTH_SCHEME`
    /// - `DATAJUD_TRIBUNAL`
    /// - credentials: `GITHUB_TOKEN`, `HIBP_API_KEY`, `DIRECT_DATA_API_KEY`, `DATAJUD_API_KEY`
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup function.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(secs) = var("INVESTIGA_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.search.timeout_secs = secs;
            tracing::debug!("Override search.timeout_secs from env: {}", secs);
        }

        if let Some(enabled) = var("INVESTIGA_AUTO_ENRICHMENT").and_then(|v| v.parse().ok()) {
            self.search.auto_enrichment = enabled;
            tracing::debug!("Override search.auto_enrichment from env: {}", enabled);
        }

        if let Some(enabled) = var("INVESTIGA_EXTRACT_NAMES").and_then(|v| v.parse().ok()) {
            self.cross.extract_names_from_text = enabled;
            tracing::debug!("Override cross.extract_names_from_text from env: {}", enabled);
        }

        if let Some(path) = var("INVESTIGA_DB_PATH") {
            tracing::debug!("Override database.path from env: {}", path);
            self.database.path = Some(PathBuf::from(path));
        }

        if let Some(url) = var("DIRECT_DATA_BASE_URL") {
            self.providers.direct_data_base_url = Some(url);
        }
        if let Some(header) = var("DIRECT_DATA_AUTH_HEADER") {
            self.providers.direct_data_auth_header = header;
        }
        if let Some(scheme) = var("DIRECT_DATA_AUTH_SCHEME") {
            self.providers.direct_data_auth_scheme = Some(scheme);
        }
        if let Some(tribunal) = var("DATAJUD_TRIBUNAL") {
            self.providers.datajud_tribunal = tribunal.to_lowercase();
        }

        self.providers.github_token = var("GITHUB_TOKEN");
        self.providers.hibp_api_key = var("HIBP_API_KEY");
        self.providers.direct_data_api_key = var("DIRECT_DATA_API_KEY");
        self.providers.datajud_api_key = var("DATAJUD_API_KEY");
    }

    /// Reject values that would make every search fail.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.search.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "search.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.search.max_items_per_provider == 0 {
            return Err(ConfigError::InvalidValue {
                field: "search.max_items_per_provider".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.providers.direct_data_auth_header.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "providers.direct_data_auth_header".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let config_dir = path.parent().ok_or_else(|| ConfigError::InvalidValue {
            field: "config_path".to_string(),
            reason: "no parent directory".to_string(),
        })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/investiga/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    /// Get the data directory path.
    ///
    /// Uses XDG base directories: `~/.local/share/investiga`
    pub fn data_dir() -> ConfigResult<PathBuf> {
        Ok(Self::project_dirs()?.data_dir().to_path_buf())
    }

    fn project_dirs() -> ConfigResult<ProjectDirs> {
        ProjectDirs::from("com", "investiga", "investiga").ok_or(ConfigError::NoConfigDir)
    }
}

/// Search orchestration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct SearchConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User agent string
    pub user_agent: String,
    /// Upper bound on items kept from list-style providers
    pub max_items_per_provider: usize,
    /// Look up CPFs and CEPs found in phone results
    pub auto_enrichment: bool,
    /// Maximum CPFs and CEPs (each) followed up by auto enrichment
    pub enrichment_limit: usize,
    /// Query web providers even for common names
    pub force_generic_providers: bool,
    /// Also search DuckDuckGo for the CPF
    pub force_duckduckgo_for_cpf: bool,
    /// Also search DuckDuckGo for the CNPJ
    pub force_duckduckgo_for_cnpj: bool,
    /// Restrict DuckDuckGo queries to government and court sites
    pub refine_duckduckgo: bool,
    /// Providers allowed to run
    pub enabled_providers: Vec<Provider>,
}

impl SearchConfig {
    /// Whether a provider is enabled.
    #[must_use]
    pub fn is_enabled(&self, provider: Provider) -> bool {
        self.enabled_providers.contains(&provider)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            user_agent: "Investiga/0.1.0 (+https://github.com/investiga-osint/investiga)"
                .to_string(),
            max_items_per_provider: 5,
            auto_enrichment: true,
            enrichment_limit: 3,
            force_generic_providers: false,
            force_duckduckgo_for_cpf: false,
            force_duckduckgo_for_cnpj: false,
            refine_duckduckgo: false,
            enabled_providers: Provider::ALL.to_vec(),
        }
    }
}

/// Cross-reference settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossConfig {
    /// Mine capitalized multi-word names from free text
    pub extract_names_from_text: bool,
    /// Hide name groups whose value looks like a common name
    pub hide_generic_names: bool,
}

impl Default for CrossConfig {
    fn default() -> Self {
        Self {
            extract_names_from_text: false,
            hide_generic_names: true,
        }
    }
}

/// Provider endpoints and credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Wikipedia language edition
    pub wikipedia_lang: String,
    /// Datajud tribunal alias (`tjsp`, `trf1`, ...)
    pub datajud_tribunal: String,
    /// Direct Data API base URL
    pub direct_data_base_url: Option<String>,
    /// Header carrying the Direct Data key
    pub direct_data_auth_header: String,
    /// Scheme prefixed to the key when the header is `Authorization`
    pub direct_data_auth_scheme: Option<String>,
    /// GitHub token (environment only)
    #[serde(skip)]
    pub github_token: Option<String>,
    /// Have I Been Pwned API key (environment only)
    #[serde(skip)]
    pub hibp_api_key: Option<String>,
    /// Direct Data API key (environment only)
    #[serde(skip)]
    pub direct_data_api_key: Option<String>,
    /// Datajud API key (environment only)
    #[serde(skip)]
    pub datajud_api_key: Option<String>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            wikipedia_lang: "en".to_string(),
            datajud_tribunal: "tjsp".to_string(),
            direct_data_base_url: None,
            direct_data_auth_header: "X-API-Key".to_string(),
            direct_data_auth_scheme: None,
            github_token: None,
            hibp_api_key: None,
            direct_data_api_key: None,
            datajud_api_key: None,
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Only export items that belong to a cross group
    pub only_crossed: bool,
}

/// Investigation history database.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database file; defaults to `investiga.db` in the data directory
    pub path: Option<PathBuf>,
}

impl DatabaseConfig {
    /// Configured path or the default location in the data directory.
    pub fn resolve_path(&self) -> ConfigResult<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => Ok(AppConfig::data_dir()?.join("investiga.db")),
        }
    }
}
