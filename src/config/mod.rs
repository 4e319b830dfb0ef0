//! Configuration management module
//!
//! This module handles loading and validating application configuration
//! from environment variables and .env files.

pub mod aws;
pub mod settings;

pub use aws::{build_aws_config, create_aws_clients, AwsClients, AwsConfigBuilder};
pub use settings::{
    Environment, LogFormat, Settings, DEFAULT_CONVERT_MODEL_ID, DEFAULT_EVENT_MODEL_ID,
};
