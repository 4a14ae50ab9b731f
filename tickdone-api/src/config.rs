/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct. All secrets are read exactly once at
/// startup and injected into the handlers through [`crate::app::AppState`];
/// business logic never reads the environment ad hoc.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `PEPPER_SECRET`: Secret concatenated with passwords before hashing
///   (required, non-empty)
/// - `PUBLIC_API_URL`: Base URL used in verification links (required)
/// - `RESEND_API_KEY`: API key for the Resend email provider (required)
/// - `MAIL_FROM`: Sender address (default: onboarding@resend.dev)
/// - `RUST_LOG`: Log level (default: info)
///
/// # Example
///
/// ```no_run
/// use tickdone_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Password hashing configuration
    pub security: SecurityConfig,

    /// Email dispatch configuration
    pub email: EmailConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// Password hashing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Process-wide pepper concatenated with passwords before hashing
    ///
    /// IMPORTANT: Must be kept secret. Losing it invalidates every stored
    /// password hash; leaking it removes the protection peppering adds.
    pub pepper: String,
}

/// Email dispatch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Resend API key
    pub resend_api_key: String,

    /// Public base URL of this deployment; verification links are
    /// `{public_api_url}/verify?token={token}`
    pub public_api_url: String,

    /// Sender address (must be a verified Resend sender)
    pub from_address: String,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or malformed. A
    /// missing `PEPPER_SECRET` or `PUBLIC_API_URL` is fatal here, before any
    /// request is served: the hasher and mailer must never run with an
    /// empty secret.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()?;

        let pepper = env::var("PEPPER_SECRET")
            .map_err(|_| anyhow::anyhow!("PEPPER_SECRET environment variable is required"))?;
        if pepper.is_empty() {
            anyhow::bail!("PEPPER_SECRET must not be empty");
        }

        let public_api_url = env::var("PUBLIC_API_URL")
            .map_err(|_| anyhow::anyhow!("PUBLIC_API_URL environment variable is required"))?;
        if public_api_url.is_empty() {
            anyhow::bail!("PUBLIC_API_URL must not be empty");
        }

        let resend_api_key = env::var("RESEND_API_KEY")
            .map_err(|_| anyhow::anyhow!("RESEND_API_KEY environment variable is required"))?;

        let from_address =
            env::var("MAIL_FROM").unwrap_or_else(|_| "onboarding@resend.dev".to_string());

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            security: SecurityConfig { pepper },
            email: EmailConfig {
                resend_api_key,
                public_api_url,
                from_address,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> Config {
        Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/test".to_string(),
                max_connections: 10,
            },
            security: SecurityConfig {
                pepper: "test-pepper".to_string(),
            },
            email: EmailConfig {
                resend_api_key: "re_test".to_string(),
                public_api_url: "http://localhost:8080".to_string(),
                from_address: "onboarding@resend.dev".to_string(),
            },
        }
    }

    #[test]
    fn test_bind_address() {
        let config = sample_config();
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }
}
