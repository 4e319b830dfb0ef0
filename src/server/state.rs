//! Application state container
//!
//! This module defines the shared application state that is passed
//! to all request handlers via Axum's state extraction.

use std::sync::Arc;
use std::time::Instant;

use crate::config::{create_aws_clients, Settings};
use crate::db::{AuditLog, AuditLogRepository, DynamoDbClient};
use crate::services::{BedrockService, ConversionService, InferenceService, ModelInvoker};
use crate::storage::{S3TranscriptStore, TranscriptStore};

/// Shared application state
///
/// Collaborators are constructed once at startup and injected into the
/// services; handlers never reach for global clients.
#[derive(Clone)]
pub struct AppState {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Single-prompt inference used by `POST /convert`
    pub inference: Arc<InferenceService>,

    /// Event-path conversion pipeline
    pub converter: Arc<ConversionService>,

    /// Application start time (for uptime calculation)
    pub start_time: Instant,
}

impl AppState {
    /// Create a new application state backed by AWS clients
    pub async fn new(settings: Settings) -> anyhow::Result<Self> {
        tracing::debug!(
            region = %settings.aws_region,
            bedrock_endpoint = ?settings.bedrock_endpoint_url,
            dynamodb_endpoint = ?settings.dynamodb_endpoint_url,
            s3_endpoint = ?settings.s3_endpoint_url,
            "Initializing AWS SDK clients"
        );

        let clients = create_aws_clients(&settings).await;

        let invoker = Arc::new(BedrockService::new(clients.bedrock));
        let transcripts = Arc::new(S3TranscriptStore::new(
            clients.s3,
            settings.s3_bucket_name.clone(),
        ));
        let dynamodb = Arc::new(DynamoDbClient::new(
            clients.dynamodb,
            settings.dynamodb_table.clone(),
        ));
        let audit_log = Arc::new(AuditLogRepository::new(dynamodb));

        let state = Self::from_parts(settings, invoker, transcripts, audit_log);

        tracing::info!(
            convert_model = %state.settings.convert_model_id,
            event_model = %state.settings.event_model_id,
            bucket = ?state.settings.s3_bucket_name,
            table = ?state.settings.dynamodb_table,
            "Application state initialized successfully"
        );

        Ok(state)
    }

    /// Assemble the state from explicit collaborators
    pub fn from_parts(
        settings: Settings,
        invoker: Arc<dyn ModelInvoker>,
        transcripts: Arc<dyn TranscriptStore>,
        audit_log: Arc<dyn AuditLog>,
    ) -> Self {
        let settings = Arc::new(settings);

        let inference = Arc::new(
            InferenceService::new(invoker).with_print_prompts(settings.print_prompts),
        );
        let converter = Arc::new(ConversionService::new(
            inference.clone(),
            transcripts,
            audit_log,
            settings.event_model_id.clone(),
        ));

        Self {
            settings,
            inference,
            converter,
            start_time: Instant::now(),
        }
    }

    /// Get the application uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Check the health of the collaborators
    pub async fn check_aws_health(&self) -> AwsHealthStatus {
        AwsHealthStatus {
            bedrock: self.inference.health_check(),
            s3: self.converter.transcripts().health_check().await,
            dynamodb: self.converter.audit_log().health_check().await,
        }
    }
}

/// Health status of AWS services
#[derive(Debug, Clone, serde::Serialize)]
pub struct AwsHealthStatus {
    pub bedrock: bool,
    pub s3: bool,
    pub dynamodb: bool,
}

impl AwsHealthStatus {
    /// Check if all AWS services are healthy
    pub fn all_healthy(&self) -> bool {
        self.bedrock && self.s3 && self.dynamodb
    }
}
