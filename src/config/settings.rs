//! Application settings and configuration
//!
//! This module provides configuration management for the application,
//! loading settings from environment variables with sensible defaults.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

use crate::services::ModelProvider;

/// Default model for the synchronous `/convert` route
pub const DEFAULT_CONVERT_MODEL_ID: &str = "amazon.titan-text-lite-v1";

/// Default model for the event-driven conversion path
pub const DEFAULT_EVENT_MODEL_ID: &str = "anthropic.claude-3-sonnet-20240229-v1:0";

/// Application environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    #[value(alias = "dev")]
    Development,
    #[value(alias = "stage")]
    Staging,
    #[value(alias = "prod")]
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => anyhow::bail!("Invalid environment: {}. Expected: development, staging, or production", s),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" | "text" => Ok(LogFormat::Pretty),
            _ => anyhow::bail!("Invalid log format: {}. Expected: json or pretty", s),
        }
    }
}

/// Main application settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    // App settings
    pub app_name: String,
    pub app_version: String,
    pub environment: Environment,
    pub log_level: String,
    pub log_format: LogFormat,

    // Server settings
    pub host: String,
    pub port: u16,

    // AWS settings
    pub aws_region: String,
    pub bedrock_endpoint_url: Option<String>,
    pub dynamodb_endpoint_url: Option<String>,
    pub s3_endpoint_url: Option<String>,
    /// Path-style S3 addressing (LocalStack, MinIO)
    pub s3_force_path_style: bool,

    /// Bucket receiving conversion transcripts.
    ///
    /// Not required at startup; a missing value surfaces on the first write.
    pub s3_bucket_name: Option<String>,

    /// Table receiving audit records (LogID, UserID, Timestamp)
    pub dynamodb_table: Option<String>,

    // Models
    /// Bedrock model used by `POST /convert`
    pub convert_model_id: String,
    /// Bedrock model used by the event handler
    pub event_model_id: String,

    // Debug options
    /// Log every prompt sent to Bedrock
    #[serde(default)]
    pub print_prompts: bool,
}

impl Settings {
    /// Load settings from environment variables with defaults
    ///
    /// Call [`Settings::validate`] once logging is initialized.
    pub fn load() -> Result<Self> {
        // Load .env file if it exists (ignored in production typically)
        dotenvy::dotenv().ok();

        let settings = Self {
            // App settings
            app_name: env_or_default("APP_NAME", "code-converter"),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: env_or_default("ENVIRONMENT", "development")
                .parse()
                .unwrap_or_default(),
            log_level: env_or_default("LOG_LEVEL", "info"),
            log_format: env_or_default("LOG_FORMAT", "json")
                .parse()
                .unwrap_or_default(),

            // Server settings
            host: env_or_default("HOST", "0.0.0.0"),
            port: env_or_default("PORT", "8000")
                .parse()
                .context("Invalid PORT value")?,

            // AWS settings
            aws_region: env_or_default("AWS_REGION", "us-east-1"),
            bedrock_endpoint_url: env_non_empty("BEDROCK_ENDPOINT_URL"),
            dynamodb_endpoint_url: env_non_empty("DYNAMODB_ENDPOINT_URL"),
            s3_endpoint_url: env_non_empty("S3_ENDPOINT_URL"),
            s3_force_path_style: env_or_default("S3_FORCE_PATH_STYLE", "false")
                .parse()
                .unwrap_or(false),

            // Persistence targets
            s3_bucket_name: env_non_empty("S3_BUCKET_NAME"),
            dynamodb_table: env_non_empty("DYNAMODB_TABLE"),

            // Models
            convert_model_id: env_or_default("CONVERT_MODEL_ID", DEFAULT_CONVERT_MODEL_ID),
            event_model_id: env_or_default("EVENT_MODEL_ID", DEFAULT_EVENT_MODEL_ID),

            // Debug options
            print_prompts: env_or_default("PRINT_PROMPTS", "false")
                .parse()
                .unwrap_or(false),
        };

        Ok(settings)
    }

    /// Validate settings
    ///
    /// Only hard errors abort startup. Missing persistence targets and unknown
    /// model ids are reported but left to fail on the request that needs them.
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("Port cannot be 0");
        }

        if self.s3_bucket_name.is_none() {
            tracing::warn!("S3_BUCKET_NAME is not set; event conversions will fail when storing transcripts");
        }

        if self.dynamodb_table.is_none() {
            tracing::warn!("DYNAMODB_TABLE is not set; audit records will not be written");
        }

        for (route, model_id) in [
            ("convert", &self.convert_model_id),
            ("event", &self.event_model_id),
        ] {
            if ModelProvider::from_model_id(model_id).is_err() {
                tracing::warn!(route, model_id = %model_id, "Configured model id has no supported provider");
            }
        }

        Ok(())
    }

    /// Get the server address string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "code-converter".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: Environment::Development,
            log_level: "info".to_string(),
            log_format: LogFormat::Json,
            host: "0.0.0.0".to_string(),
            port: 8000,
            aws_region: "us-east-1".to_string(),
            bedrock_endpoint_url: None,
            dynamodb_endpoint_url: None,
            s3_endpoint_url: None,
            s3_force_path_style: false,
            s3_bucket_name: None,
            dynamodb_table: None,
            convert_model_id: DEFAULT_CONVERT_MODEL_ID.to_string(),
            event_model_id: DEFAULT_EVENT_MODEL_ID.to_string(),
            print_prompts: false,
        }
    }
}

/// Helper function to get environment variable with default
fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Environment variable, treating an empty value as unset
fn env_non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
