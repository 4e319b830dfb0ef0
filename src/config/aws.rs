//! AWS SDK configuration
//!
//! This module provides AWS SDK configuration for the Bedrock Runtime, DynamoDB
//! and S3 clients, supporting custom endpoints for local development and testing.

use aws_config::{meta::region::RegionProviderChain, BehaviorVersion, Region, SdkConfig};
use aws_sdk_bedrockruntime::Client as BedrockRuntimeClient;
use aws_sdk_dynamodb::Client as DynamoDbSdkClient;
use aws_sdk_s3::Client as S3SdkClient;

use crate::config::Settings;

/// AWS configuration builder
///
/// Creates AWS SDK configuration with support for:
/// - Custom regions
/// - Credential providers (environment, instance profile, etc.)
/// - Custom endpoint URLs for local testing
pub struct AwsConfigBuilder<'a> {
    settings: &'a Settings,
}

impl<'a> AwsConfigBuilder<'a> {
    /// Create a new AWS configuration builder
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Build the base AWS SDK configuration shared by every service client
    pub async fn build_sdk_config(&self) -> SdkConfig {
        let region_provider = RegionProviderChain::first_try(Region::new(self.settings.aws_region.clone()))
            .or_default_provider();

        aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .load()
            .await
    }

    /// Create a DynamoDB client from an already loaded SDK config
    ///
    /// Honors `DYNAMODB_ENDPOINT_URL` (DynamoDB Local, LocalStack).
    pub fn dynamodb_client(&self, sdk_config: &SdkConfig) -> DynamoDbSdkClient {
        match &self.settings.dynamodb_endpoint_url {
            Some(endpoint_url) => {
                tracing::info!(endpoint = %endpoint_url, "Using custom DynamoDB endpoint");
                let config = aws_sdk_dynamodb::config::Builder::from(sdk_config)
                    .endpoint_url(endpoint_url)
                    .build();
                DynamoDbSdkClient::from_conf(config)
            }
            None => DynamoDbSdkClient::new(sdk_config),
        }
    }

    /// Create a Bedrock Runtime client from an already loaded SDK config
    pub fn bedrock_client(&self, sdk_config: &SdkConfig) -> BedrockRuntimeClient {
        match &self.settings.bedrock_endpoint_url {
            Some(endpoint_url) => {
                tracing::info!(endpoint = %endpoint_url, "Using custom Bedrock endpoint");
                let config = aws_sdk_bedrockruntime::config::Builder::from(sdk_config)
                    .endpoint_url(endpoint_url)
                    .build();
                BedrockRuntimeClient::from_conf(config)
            }
            None => BedrockRuntimeClient::new(sdk_config),
        }
    }

    /// Create an S3 client from an already loaded SDK config
    ///
    /// Custom endpoints usually need path-style addressing, controlled by
    /// `S3_FORCE_PATH_STYLE`.
    pub fn s3_client(&self, sdk_config: &SdkConfig) -> S3SdkClient {
        let mut builder = aws_sdk_s3::config::Builder::from(sdk_config)
            .force_path_style(self.settings.s3_force_path_style);

        if let Some(endpoint_url) = &self.settings.s3_endpoint_url {
            tracing::info!(endpoint = %endpoint_url, "Using custom S3 endpoint");
            builder = builder.endpoint_url(endpoint_url);
        }

        S3SdkClient::from_conf(builder.build())
    }

    /// Load the SDK config once and derive all three clients from it
    pub async fn build_clients(&self) -> AwsClients {
        let sdk_config = self.build_sdk_config().await;

        AwsClients {
            bedrock: self.bedrock_client(&sdk_config),
            dynamodb: self.dynamodb_client(&sdk_config),
            s3: self.s3_client(&sdk_config),
        }
    }
}

/// The AWS service clients used by the application
#[derive(Clone)]
pub struct AwsClients {
    pub bedrock: BedrockRuntimeClient,
    pub dynamodb: DynamoDbSdkClient,
    pub s3: S3SdkClient,
}

/// Build AWS SDK config from settings (convenience function)
pub async fn build_aws_config(settings: &Settings) -> SdkConfig {
    AwsConfigBuilder::new(settings).build_sdk_config().await
}

/// Create every AWS client from settings (convenience function)
pub async fn create_aws_clients(settings: &Settings) -> AwsClients {
    AwsConfigBuilder::new(settings).build_clients().await
}
