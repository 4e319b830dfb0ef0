//! Conversion data models
//!
//! A [`ConversionRecord`] is created once per successful event-path conversion
//! and persisted twice: as a plaintext transcript in S3 and as an
//! [`AuditRecord`] row in DynamoDB. Neither is ever updated.

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Timestamp layout shared by the transcript, the storage key and the audit row
/// (ISO-8601, UTC, no offset, microseconds).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Date layout used as the middle segment of storage keys
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One completed conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionRecord {
    pub log_id: Uuid,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub target_language: String,
    pub converted_code: String,
}

impl ConversionRecord {
    /// Create a record with a fresh random id, stamped now
    pub fn new(
        user_id: impl Into<String>,
        target_language: impl Into<String>,
        converted_code: impl Into<String>,
    ) -> Self {
        Self {
            log_id: Uuid::new_v4(),
            user_id: user_id.into(),
            created_at: Utc::now(),
            target_language: target_language.into(),
            converted_code: converted_code.into(),
        }
    }

    /// Timestamp string written to the transcript, key and audit row
    pub fn timestamp(&self) -> String {
        self.created_at.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Object key of the transcript
    pub fn storage_key(&self) -> String {
        storage_key(
            &self.user_id,
            self.created_at.date_naive(),
            &self.timestamp(),
            &self.target_language,
            &self.log_id.to_string(),
        )
    }

    /// Plaintext transcript body
    pub fn transcript(&self) -> String {
        format!(
            "UserID: {}\nTimestamp: {}\nTargetLang: {}\nCode:\n{}",
            self.user_id,
            self.timestamp(),
            self.target_language,
            self.converted_code
        )
    }

    /// The audit row for this conversion
    pub fn audit_record(&self) -> AuditRecord {
        AuditRecord {
            log_id: self.log_id.to_string(),
            user_id: self.user_id.clone(),
            timestamp: self.timestamp(),
        }
    }
}

/// `{user_id}/{date}/{user_id}_{timestamp}_{target_language}_{log_id}.txt`
pub fn storage_key(
    user_id: &str,
    date: NaiveDate,
    timestamp: &str,
    target_language: &str,
    log_id: &str,
) -> String {
    format!(
        "{user_id}/{date}/{user_id}_{timestamp}_{target_language}_{log_id}.txt",
        date = date.format(DATE_FORMAT)
    )
}

/// Audit row stored in the conversion log table.
///
/// Stored with `LogID` as partition key. All attributes are strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub log_id: String,
    pub user_id: String,
    pub timestamp: String,
}

impl AuditRecord {
    /// Convert to DynamoDB item
    pub fn to_dynamodb(&self) -> HashMap<String, AttributeValue> {
        HashMap::from([
            ("LogID".to_string(), AttributeValue::S(self.log_id.clone())),
            ("UserID".to_string(), AttributeValue::S(self.user_id.clone())),
            ("Timestamp".to_string(), AttributeValue::S(self.timestamp.clone())),
        ])
    }

    /// Parse from DynamoDB item
    pub fn from_dynamodb(item: &HashMap<String, AttributeValue>) -> Option<Self> {
        Some(Self {
            log_id: get_string(item, "LogID")?,
            user_id: get_string(item, "UserID")?,
            timestamp: get_string(item, "Timestamp")?,
        })
    }
}

fn get_string(item: &HashMap<String, AttributeValue>, key: &str) -> Option<String> {
    item.get(key)?.as_s().ok().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_record() -> ConversionRecord {
        ConversionRecord {
            log_id: Uuid::parse_str("7d444840-9dc0-11d1-b245-5ffdce74fad2").unwrap(),
            user_id: "u1".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 5).unwrap(),
            target_language: "go".to_string(),
            converted_code: "fmt.Println(1)".to_string(),
        }
    }

    #[test]
    fn test_storage_key_layout() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let key = storage_key("u1", date, "2024-01-01T00:00:00.000000", "go", "abc");
        assert_eq!(key, "u1/2024-01-01/u1_2024-01-01T00:00:00.000000_go_abc.txt");
    }

    #[test]
    fn test_record_key_and_timestamp() {
        let record = fixed_record();
        assert_eq!(record.timestamp(), "2024-01-01T09:30:05.000000");
        assert_eq!(
            record.storage_key(),
            "u1/2024-01-01/u1_2024-01-01T09:30:05.000000_go_7d444840-9dc0-11d1-b245-5ffdce74fad2.txt"
        );
    }

    #[test]
    fn test_transcript_body() {
        let record = fixed_record();
        assert_eq!(
            record.transcript(),
            "UserID: u1\nTimestamp: 2024-01-01T09:30:05.000000\nTargetLang: go\nCode:\nfmt.Println(1)"
        );
    }

    #[test]
    fn test_audit_record_dynamodb_roundtrip_keys() {
        let audit = fixed_record().audit_record();
        let item = audit.to_dynamodb();

        assert_eq!(item.len(), 3);
        assert_eq!(
            item.get("LogID"),
            Some(&AttributeValue::S("7d444840-9dc0-11d1-b245-5ffdce74fad2".to_string()))
        );
        assert_eq!(item.get("UserID"), Some(&AttributeValue::S("u1".to_string())));
        assert_eq!(AuditRecord::from_dynamodb(&item), Some(audit));
    }

    #[test]
    fn test_new_records_get_distinct_ids() {
        let a = ConversionRecord::new("u1", "go", "x");
        let b = ConversionRecord::new("u1", "go", "x");
        assert_ne!(a.log_id, b.log_id);
    }
}
