//! Repository pattern implementations
//!
//! Data access objects for DynamoDB tables.

pub mod audit_log;

pub use audit_log::{AuditLog, AuditLogError, AuditLogRepository};
