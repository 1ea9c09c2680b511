use crate::core::{AppError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;
use std::str::FromStr;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    /// Fraction of an order total credited to the delivery agent at delivery
    pub commission_rate: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// Key material for the signed session cookie (at least 32 bytes)
    pub session_secret: String,
    pub rate_limit_per_minute: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                commission_rate: Decimal::from_str(
                    &env::var("COMMISSION_RATE").unwrap_or_else(|_| "0.10".to_string()),
                )
                .map_err(|_| AppError::Configuration("Invalid COMMISSION_RATE".to_string()))?,
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            security: SecurityConfig {
                session_secret: env::var("SESSION_SECRET")
                    .map_err(|_| AppError::Configuration("SESSION_SECRET not set".to_string()))?,
                rate_limit_per_minute: env::var("RATE_LIMIT_PER_MINUTE")
                    .unwrap_or_else(|_| "1000".to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid RATE_LIMIT_PER_MINUTE".to_string())
                    })?,
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.app.commission_rate < Decimal::ZERO || self.app.commission_rate >= Decimal::ONE {
            return Err(AppError::Configuration(
                "Commission rate must be within [0, 1)".to_string(),
            ));
        }

        if self.security.session_secret.len() < 32 {
            return Err(AppError::Configuration(
                "Session secret must be at least 32 bytes".to_string(),
            ));
        }

        if self.security.rate_limit_per_minute == 0 {
            return Err(AppError::Configuration(
                "Rate limit must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn test_config(commission_rate: Decimal, secret: &str) -> Config {
        Config {
            app: AppConfig {
                env: "test".to_string(),
                log_level: "debug".to_string(),
                commission_rate,
            },
            database: DatabaseConfig {
                url: "mysql://localhost/elara".to_string(),
                pool_size: 5,
                max_connections: 10,
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                workers: 2,
            },
            security: SecurityConfig {
                session_secret: secret.to_string(),
                rate_limit_per_minute: 100,
            },
        }
    }

    #[test]
    fn test_valid_config() {
        let config = test_config(dec!(0.10), "0123456789abcdef0123456789abcdef");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_commission_rate_of_one() {
        let config = test_config(dec!(1.0), "0123456789abcdef0123456789abcdef");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_short_session_secret() {
        let config = test_config(dec!(0.10), "too-short");
        assert!(config.validate().is_err());
    }
}
