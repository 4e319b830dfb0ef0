//! Audit log repository
//!
//! Data access layer for the conversion audit table.

use async_trait::async_trait;
use aws_smithy_types::error::display::DisplayErrorContext;
use std::sync::Arc;

use crate::db::models::AuditRecord;
use crate::db::DynamoDbClient;

/// Write-only sink for audit records.
///
/// Implemented by [`AuditLogRepository`] in production and by substitutes in tests.
#[async_trait]
pub trait AuditLog: Send + Sync {
    /// Persist one audit record
    async fn record(&self, record: &AuditRecord) -> Result<(), AuditLogError>;

    /// Whether the sink is reachable
    async fn health_check(&self) -> bool {
        true
    }
}

/// Repository for the conversion audit table
#[derive(Clone)]
pub struct AuditLogRepository {
    client: Arc<DynamoDbClient>,
}

impl AuditLogRepository {
    /// Create a new audit log repository
    pub fn new(client: Arc<DynamoDbClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuditLog for AuditLogRepository {
    async fn record(&self, record: &AuditRecord) -> Result<(), AuditLogError> {
        let table = self
            .client
            .audit_table()
            .ok_or(AuditLogError::TableNotConfigured)?;

        self.client
            .client()
            .put_item()
            .table_name(table)
            .set_item(Some(record.to_dynamodb()))
            .send()
            .await
            .map_err(|e| AuditLogError::DynamoDb(DisplayErrorContext(&e).to_string()))?;

        tracing::debug!(
            table = %table,
            log_id = %record.log_id,
            user_id = %record.user_id,
            "Recorded conversion audit entry"
        );

        Ok(())
    }

    async fn health_check(&self) -> bool {
        self.client.health_check().await
    }
}

/// Errors that can occur during audit log operations
#[derive(Debug, thiserror::Error)]
pub enum AuditLogError {
    #[error("DynamoDB error: {0}")]
    DynamoDb(String),

    #[error("Audit table is not configured (set DYNAMODB_TABLE)")]
    TableNotConfigured,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_table_fails_before_calling_dynamodb() {
        let sdk_config = aws_sdk_dynamodb::Config::builder()
            .behavior_version(aws_sdk_dynamodb::config::BehaviorVersion::latest())
            .region(aws_sdk_dynamodb::config::Region::new("us-east-1"))
            .build();
        let client = DynamoDbClient::new(aws_sdk_dynamodb::Client::from_conf(sdk_config), None);
        let repo = AuditLogRepository::new(Arc::new(client));

        let record = AuditRecord {
            log_id: "abc".to_string(),
            user_id: "u1".to_string(),
            timestamp: "2024-01-01T00:00:00.000000".to_string(),
        };

        let err = repo.record(&record).await.unwrap_err();
        assert!(matches!(err, AuditLogError::TableNotConfigured));
        assert!(!repo.health_check().await);
    }
}
