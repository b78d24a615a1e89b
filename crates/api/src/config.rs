//! # API Client Configuration Module
//!
//! This module handles loading and managing configuration for the canteen
//! backend client. It retrieves configuration values from environment
//! variables and provides defaults where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `CANTEEN_API_BASE_URL`: Base URL of the backend (required)
//! - `CANTEEN_API_TIMEOUT_SECONDS`: Request timeout in seconds (default: 30)
//! - `LOG_LEVEL`: Logging level (default: "info")

use eyre::{Result, WrapErr};
use std::env;
use tracing::Level;

/// Configuration for the canteen backend client
///
/// This struct encapsulates all configuration options for reaching the
/// external backend: where it lives and how long to wait for it.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the backend (e.g., "https://canteen.example.edu")
    pub base_url: String,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Log level for the application
    pub log_level: Level,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// This function loads configuration values from environment
    /// variables, providing sensible defaults where possible. The base
    /// URL is required and will cause an error if not set.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The CANTEEN_API_BASE_URL environment variable is not set
    /// - The CANTEEN_API_TIMEOUT_SECONDS value cannot be parsed as a u64
    pub fn from_env() -> Result<Self> {
        // Backend settings
        let base_url = env::var("CANTEEN_API_BASE_URL")
            .wrap_err("CANTEEN_API_BASE_URL environment variable must be set")?;

        // Performance settings
        let request_timeout = env::var("CANTEEN_API_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .wrap_err("Invalid CANTEEN_API_TIMEOUT_SECONDS value")?;

        // Logging settings
        let log_level = match env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()).as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        Ok(Self {
            base_url,
            request_timeout,
            log_level,
        })
    }
}
