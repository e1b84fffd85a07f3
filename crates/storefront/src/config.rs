//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `FA_SELLER_PHONE` - Seller's messaging number (default: 919798303821)
//! - `FA_BASE_URL` - Public URL of the site, used for image links
//!   (default: <http://localhost:8000>)
//! - `FA_MESSAGING_DOMAIN` - Deep-link host (default: wa.me)
//! - `FA_CURRENCY` - ISO 4217 code for price display (default: INR)
//! - `FA_STORAGE_PATH` - File backing cart storage
//!   (default: .fa-portfolio/storage.json)
//! - `FA_CATALOG_PATH` - JSON catalog replacing the built-in one

use std::path::PathBuf;

use fa_portfolio_core::{CurrencyCode, DestinationId};
use thiserror::Error;
use url::Url;

const DEFAULT_SELLER_PHONE: &str = "919798303821";
const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_MESSAGING_DOMAIN: &str = "wa.me";
const DEFAULT_STORAGE_PATH: &str = ".fa-portfolio/storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Contact that checkout links open a chat with
    pub seller_phone: DestinationId,
    /// Public base URL of the site
    pub base_url: Url,
    /// Host of the messaging deep links
    pub messaging_domain: String,
    /// Currency for price display
    pub currency: CurrencyCode,
    /// File backing the key-value cart storage
    pub storage_path: PathBuf,
    /// Optional catalog file; the built-in catalog is used when unset
    pub catalog_path: Option<PathBuf>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let vars = Vars(lookup);

        let seller_phone = DestinationId::parse(
            &vars.get_or_default("FA_SELLER_PHONE", DEFAULT_SELLER_PHONE),
        )
        .map_err(|e| invalid("FA_SELLER_PHONE", &e))?;

        let base_url = parse_base_url(&vars.get_or_default("FA_BASE_URL", DEFAULT_BASE_URL))?;

        let messaging_domain =
            vars.get_or_default("FA_MESSAGING_DOMAIN", DEFAULT_MESSAGING_DOMAIN);
        validate_domain(&messaging_domain)?;

        let currency = match vars.get_optional("FA_CURRENCY") {
            Some(code) => code
                .parse::<CurrencyCode>()
                .map_err(|e| invalid("FA_CURRENCY", &e))?,
            None => CurrencyCode::default(),
        };

        let storage_path =
            PathBuf::from(vars.get_or_default("FA_STORAGE_PATH", DEFAULT_STORAGE_PATH));
        let catalog_path = vars.get_optional("FA_CATALOG_PATH").map(PathBuf::from);

        Ok(Self {
            seller_phone,
            base_url,
            messaging_domain,
            currency,
            storage_path,
            catalog_path,
        })
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        // Defaults are constants that always validate.
        #[allow(clippy::expect_used)]
        Self::from_lookup(|_| None).expect("default configuration is valid")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable source with empty values treated as unset.
struct Vars<F>(F);

impl<F: Fn(&str) -> Option<String>> Vars<F> {
    /// Get an optional variable.
    fn get_optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn get_or_default(&self, key: &str, default: &str) -> String {
        self.get_optional(key)
            .unwrap_or_else(|| default.to_string())
    }
}

fn invalid(key: &str, err: &impl ToString) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), err.to_string())
}

/// Parse the site URL; it must be http(s) so it has a usable origin.
fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|e| invalid("FA_BASE_URL", &e))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ConfigError::InvalidEnvVar(
            "FA_BASE_URL".to_string(),
            format!("must be an http(s) URL with a host (got {value})"),
        ));
    }
    Ok(url)
}

/// The messaging domain is interpolated into links, so only accept a bare
/// host name.
fn validate_domain(domain: &str) -> Result<(), ConfigError> {
    let valid = !domain.starts_with(['.', '-'])
        && !domain.ends_with(['.', '-'])
        && domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidEnvVar(
            "FA_MESSAGING_DOMAIN".to_string(),
            format!("must be a bare host name (got {domain})"),
        ))
    }
}
