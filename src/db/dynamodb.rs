//! DynamoDB client wrapper
//!
//! This module provides a wrapper around the AWS DynamoDB SDK client
//! bound to the conversion audit table.

use aws_sdk_dynamodb::Client as DynamoDbSdkClient;
use aws_smithy_types::error::display::DisplayErrorContext;

/// DynamoDB client wrapper for database operations.
#[derive(Clone)]
pub struct DynamoDbClient {
    /// AWS DynamoDB SDK client
    client: DynamoDbSdkClient,

    /// Audit table name (`DYNAMODB_TABLE`), unset until configured
    audit_table: Option<String>,
}

impl DynamoDbClient {
    /// Create a new DynamoDB client.
    ///
    /// # Arguments
    /// * `client` - AWS DynamoDB SDK client
    /// * `audit_table` - Table receiving audit records, if configured
    pub fn new(client: DynamoDbSdkClient, audit_table: Option<String>) -> Self {
        Self { client, audit_table }
    }

    /// Get a reference to the underlying AWS SDK client
    pub fn client(&self) -> &DynamoDbSdkClient {
        &self.client
    }

    /// Get the audit table name
    pub fn audit_table(&self) -> Option<&str> {
        self.audit_table.as_deref()
    }

    /// Check if the audit table is reachable
    ///
    /// Performs a `DescribeTable` on the audit table.
    pub async fn health_check(&self) -> bool {
        let Some(table) = self.audit_table() else {
            tracing::debug!("DynamoDB health check skipped: no audit table configured");
            return false;
        };

        match self.client.describe_table().table_name(table).send().await {
            Ok(_) => {
                tracing::debug!(table = %table, "DynamoDB health check passed");
                true
            }
            Err(e) => {
                tracing::warn!(table = %table, error = %DisplayErrorContext(&e), "DynamoDB health check failed");
                false
            }
        }
    }
}
