//! Database module
//!
//! Contains the DynamoDB client, the conversion data models and the audit
//! log data access layer.

pub mod dynamodb;
pub mod models;
pub mod repositories;

pub use dynamodb::DynamoDbClient;
pub use models::{storage_key, AuditRecord, ConversionRecord};
pub use repositories::{AuditLog, AuditLogError, AuditLogRepository};
