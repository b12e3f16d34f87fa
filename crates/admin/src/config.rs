//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `ADMIN_BASE_URL` - Public URL for the admin console (default: `http://localhost:<port>`)
//! - `ADMIN_STOREFRONT_URL` - Storefront origin used for product detail links
//!   (default: `http://localhost:3000`)
//! - `PHARMACONNECT_API_URL` - REST backend origin (default: the hosted backend)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance trace sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;
use url::Url;

/// Backend origin used when `PHARMACONNECT_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "https://pharmaconnect-backend.onrender.com";

/// Storefront origin used when `ADMIN_STOREFRONT_URL` is not set.
pub const DEFAULT_STOREFRONT_URL: &str = "http://localhost:3000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the admin console
    pub base_url: String,
    /// Storefront origin, without a trailing slash
    pub storefront_url: String,
    /// REST backend configuration
    pub backend: BackendConfig,
    /// Error tracking configuration
    pub sentry: SentryConfig,
}

/// REST backend configuration.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Backend origin, without a trailing slash
    pub api_url: String,
}

/// Sentry error tracking configuration.
#[derive(Debug, Clone)]
pub struct SentryConfig {
    pub dsn: Option<String>,
    pub environment: Option<String>,
    pub sample_rate: f32,
    pub traces_sample_rate: f32,
}

impl Default for SentryConfig {
    fn default() -> Self {
        Self {
            dsn: None,
            environment: None,
            sample_rate: 1.0,
            traces_sample_rate: 0.0,
        }
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("ADMIN_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("ADMIN_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_PORT".to_string(), e.to_string()))?;
        let base_url = get_env_or_default("ADMIN_BASE_URL", &format!("http://localhost:{port}"));

        let storefront_url = get_env_or_default("ADMIN_STOREFRONT_URL", DEFAULT_STOREFRONT_URL);
        let storefront_url = normalize_origin(&storefront_url)
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_STOREFRONT_URL".to_string(), e))?;

        Ok(Self {
            host,
            port,
            base_url,
            storefront_url,
            backend: BackendConfig::from_env()?,
            sentry: SentryConfig::from_env()?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the admin console is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }

    /// Storefront URL of a product's detail page.
    #[must_use]
    pub fn product_url(&self, id: &str) -> String {
        format!(
            "{}/productdetails/{}",
            self.storefront_url,
            urlencoding::encode(id)
        )
    }
}

impl BackendConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw = get_env_or_default("PHARMACONNECT_API_URL", DEFAULT_API_URL);
        Self::new(&raw)
            .map_err(|e| ConfigError::InvalidEnvVar("PHARMACONNECT_API_URL".to_string(), e))
    }

    /// Validate and normalize a backend origin.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem if the URL is not absolute HTTP(S).
    pub fn new(api_url: &str) -> Result<Self, String> {
        Ok(Self {
            api_url: normalize_origin(api_url)?,
        })
    }
}

impl SentryConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            dsn: get_optional_env("SENTRY_DSN"),
            environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sample_rate: get_rate("SENTRY_SAMPLE_RATE", 1.0)?,
            traces_sample_rate: get_rate("SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Check that `raw` is an absolute HTTP(S) URL and drop any trailing slash.
fn normalize_origin(raw: &str) -> Result<String, String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme: {}", url.scheme()));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a sample rate in `[0, 1]`.
fn get_rate(key: &str, default: f32) -> Result<f32, ConfigError> {
    let Some(raw) = get_optional_env(key) else {
        return Ok(default);
    };

    let rate = raw
        .parse::<f32>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0 and 1 (got {rate})"),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config() -> AdminConfig {
        AdminConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3001,
            base_url: "https://admin.pharmacy.test".to_string(),
            storefront_url: "https://shop.pharmacy.test".to_string(),
            backend: BackendConfig::new(DEFAULT_API_URL).unwrap(),
            sentry: SentryConfig::default(),
        }
    }

    #[test]
    fn test_socket_addr() {
        let addr = config().socket_addr();
        assert_eq!(addr.port(), 3001);
        assert!(config().is_secure());
    }

    #[test]
    fn test_product_url_points_at_storefront() {
        assert_eq!(
            config().product_url("abc123"),
            "https://shop.pharmacy.test/productdetails/abc123"
        );
        assert_eq!(
            config().product_url("a/b?c"),
            "https://shop.pharmacy.test/productdetails/a%2Fb%3Fc"
        );
    }

    #[test]
    fn test_normalize_origin() {
        assert_eq!(
            normalize_origin("http://localhost:4000/").unwrap(),
            "http://localhost:4000"
        );
        assert!(normalize_origin("localhost:4000").is_err());
    }
}
