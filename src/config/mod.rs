//! Configuration management for DeedVault
//!
//! This module handles loading and validating configuration from environment
//! variables, with support for different environments.

use std::env;
use std::str::FromStr;

use thiserror::Error;

use crate::models::Address;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid environment value: {0}")]
    InvalidValue(String),

    #[error("Invalid port number: {0}")]
    InvalidPort(String),
}

/// Application environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Parse environment from string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "prod" | "production" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidValue(format!(
                "Invalid environment: '{}'. Expected: dev, staging, or prod",
                s
            ))),
        }
    }

    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Get the environment name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Current environment
    pub environment: Environment,

    /// Server port
    pub port: u16,

    /// Log level (RUST_LOG)
    pub log_level: String,

    /// CORS allowed origins
    pub cors_allowed_origins: Option<String>,

    /// Seller address fixed for the escrow ledger
    pub seller_address: Address,

    /// Inspector address fixed for the escrow ledger
    pub inspector_address: Address,

    /// Lender address fixed for the escrow ledger
    pub lender_address: Address,

    /// Reject listings whose earnest deposit exceeds the purchase price
    pub enforce_deposit_cap: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .map(|s| Environment::parse(&s))
            .unwrap_or(Ok(Environment::Development))?;

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3001".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort("PORT must be a valid number".to_string()))?;

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS").ok();

        let seller_address = require_address("SELLER_ADDRESS")?;
        let inspector_address = require_address("INSPECTOR_ADDRESS")?;
        let lender_address = require_address("LENDER_ADDRESS")?;

        let enforce_deposit_cap = env::var("ENFORCE_DEPOSIT_CAP")
            .map(|s| parse_bool(&s))
            .unwrap_or(Ok(true))?;

        Ok(Config {
            environment,
            port,
            log_level,
            cors_allowed_origins,
            seller_address,
            inspector_address,
            lender_address,
            enforce_deposit_cap,
        })
    }
}

/// Read a required UUID-form address from the environment
fn require_address(key: &str) -> Result<Address, ConfigError> {
    let value = env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))?;
    Address::from_str(&value)
        .map_err(|_| ConfigError::InvalidValue(format!("{} is not a valid address: '{}'", key, value)))
}

/// Parse a boolean environment value
fn parse_bool(s: &str) -> Result<bool, ConfigError> {
    match s.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue(format!(
            "Expected a boolean, got '{}'",
            s
        ))),
    }
}
