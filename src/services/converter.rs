//! Event-path conversion service
//!
//! Runs one conversion end to end: prompt, inference, extraction, transcript
//! write, audit write. Calls are strictly sequential and never retried. The
//! transcript and audit writes are not transactional.

use std::sync::Arc;

use crate::db::{AuditLog, ConversionRecord};
use crate::error::ConversionError;
use crate::schemas::ConversionRequest;
use crate::services::extractor::extract_code_block;
use crate::services::inference::{GenerationParams, InferenceError, InferenceService};
use crate::services::prompt::marked_translation_prompt;
use crate::storage::TranscriptStore;
use crate::utils::log_preview;

/// Result of a successful conversion
#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    pub record: ConversionRecord,
    /// Object key of the stored transcript
    pub storage_key: String,
}

/// Orchestrates the event-path conversion over injected collaborators
#[derive(Clone)]
pub struct ConversionService {
    inference: Arc<InferenceService>,
    transcripts: Arc<dyn TranscriptStore>,
    audit_log: Arc<dyn AuditLog>,
    model_id: String,
}

impl ConversionService {
    pub fn new(
        inference: Arc<InferenceService>,
        transcripts: Arc<dyn TranscriptStore>,
        audit_log: Arc<dyn AuditLog>,
        model_id: impl Into<String>,
    ) -> Self {
        Self {
            inference,
            transcripts,
            audit_log,
            model_id: model_id.into(),
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn transcripts(&self) -> &Arc<dyn TranscriptStore> {
        &self.transcripts
    }

    pub fn audit_log(&self) -> &Arc<dyn AuditLog> {
        &self.audit_log
    }

    /// Convert the request, store its transcript and record it in the audit log.
    ///
    /// A failed audit write is logged and ignored; every other failure is returned.
    pub async fn convert(&self, request: &ConversionRequest) -> Result<ConversionOutcome, ConversionError> {
        let prompt = marked_translation_prompt(
            &request.source_language,
            &request.target_language,
            &request.source_code,
        );

        let reply = match self
            .inference
            .complete(&self.model_id, &prompt, &GenerationParams::chat())
            .await
        {
            Ok(reply) => reply,
            Err(InferenceError::MalformedResponse(reason)) => {
                tracing::warn!(model_id = %self.model_id, reason = %reason, "Unreadable model response");
                None
            }
            Err(e) => return Err(e.into()),
        };

        let reply = reply
            .filter(|text| !text.trim().is_empty())
            .ok_or(ConversionError::EmptyResponse)?;

        let converted_code = extract_code_block(&reply, Some(&request.target_language));

        tracing::debug!(
            user_id = %request.user_id,
            target_language = %request.target_language,
            code = %log_preview(&converted_code, 120),
            "Extracted converted code"
        );

        let record = ConversionRecord::new(&request.user_id, &request.target_language, converted_code);
        let storage_key = record.storage_key();

        self.transcripts
            .put_transcript(&storage_key, record.transcript())
            .await?;

        let audit = record.audit_record();
        if let Err(e) = self.audit_log.record(&audit).await {
            tracing::warn!(
                log_id = %audit.log_id,
                user_id = %audit.user_id,
                error = %e,
                "Failed to write audit record; continuing"
            );
        }

        tracing::info!(
            log_id = %record.log_id,
            user_id = %record.user_id,
            source_language = %request.source_language,
            target_language = %record.target_language,
            s3_key = %storage_key,
            "Conversion stored"
        );

        Ok(ConversionOutcome { record, storage_key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{AuditLogError, AuditRecord};
    use crate::services::bedrock::{BedrockError, ModelInvoker};
    use crate::storage::StorageError;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    const CLAUDE: &str = "anthropic.claude-3-sonnet-20240229-v1:0";

    struct ClaudeReply(Value);

    #[async_trait]
    impl ModelInvoker for ClaudeReply {
        async fn invoke_model(&self, _model_id: &str, _body: Vec<u8>) -> Result<Vec<u8>, BedrockError> {
            Ok(serde_json::to_vec(&self.0).unwrap())
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        objects: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl TranscriptStore for MemoryStore {
        async fn put_transcript(&self, key: &str, body: String) -> Result<(), StorageError> {
            if self.fail {
                return Err(StorageError::S3("AccessDenied".to_string()));
            }
            self.objects.lock().unwrap().push((key.to_string(), body));
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemoryAudit {
        rows: Mutex<Vec<AuditRecord>>,
        fail: bool,
    }

    #[async_trait]
    impl AuditLog for MemoryAudit {
        async fn record(&self, record: &AuditRecord) -> Result<(), AuditLogError> {
            if self.fail {
                return Err(AuditLogError::DynamoDb("ResourceNotFoundException".to_string()));
            }
            self.rows.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    fn service(
        reply: Value,
        store: Arc<MemoryStore>,
        audit: Arc<MemoryAudit>,
        model_id: &str,
    ) -> ConversionService {
        let inference = Arc::new(InferenceService::new(Arc::new(ClaudeReply(reply))));
        ConversionService::new(inference, store, audit, model_id)
    }

    fn request() -> ConversionRequest {
        ConversionRequest {
            source_code: "print(1)".to_string(),
            source_language: "python".to_string(),
            target_language: "go".to_string(),
            user_id: "u1".to_string(),
        }
    }

    fn claude_text(text: &str) -> Value {
        json!({"content": [{"type": "text", "text": text}]})
    }

    #[tokio::test]
    async fn test_convert_stores_transcript_and_audit() {
        let store = Arc::new(MemoryStore::default());
        let audit = Arc::new(MemoryAudit::default());
        let svc = service(claude_text("Code:\nfmt.Println(1)"), store.clone(), audit.clone(), CLAUDE);

        let outcome = svc.convert(&request()).await.unwrap();

        assert_eq!(outcome.record.converted_code, "fmt.Println(1)");
        assert!(outcome.storage_key.starts_with("u1/"));
        assert!(outcome.storage_key.ends_with(&format!("_go_{}.txt", outcome.record.log_id)));

        let objects = store.objects.lock().unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].0, outcome.storage_key);
        assert!(objects[0].1.starts_with("UserID: u1\nTimestamp: "));
        assert!(objects[0].1.ends_with("TargetLang: go\nCode:\nfmt.Println(1)"));

        let rows = audit.rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].log_id, outcome.record.log_id.to_string());
        assert_eq!(rows[0].user_id, "u1");
    }

    #[tokio::test]
    async fn test_audit_failure_does_not_fail_conversion() {
        let store = Arc::new(MemoryStore::default());
        let audit = Arc::new(MemoryAudit {
            fail: true,
            ..MemoryAudit::default()
        });
        let svc = service(claude_text("Code:\nx := 1"), store.clone(), audit, CLAUDE);

        let outcome = svc.convert(&request()).await.unwrap();
        assert_eq!(outcome.record.converted_code, "x := 1");
        assert_eq!(store.objects.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_storage_failure_is_fatal_and_skips_audit() {
        let store = Arc::new(MemoryStore {
            fail: true,
            ..MemoryStore::default()
        });
        let audit = Arc::new(MemoryAudit::default());
        let svc = service(claude_text("Code:\nx := 1"), store, audit.clone(), CLAUDE);

        let err = svc.convert(&request()).await.unwrap_err();
        assert!(matches!(err, ConversionError::Storage(_)));
        assert!(audit.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_reply() {
        for reply in [claude_text(""), claude_text("  \n"), json!({"content": []}), json!("oops")] {
            let store = Arc::new(MemoryStore::default());
            let svc = service(reply, store.clone(), Arc::new(MemoryAudit::default()), CLAUDE);

            let err = svc.convert(&request()).await.unwrap_err();
            assert!(matches!(err, ConversionError::EmptyResponse));
            assert!(store.objects.lock().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_unsupported_model() {
        let store = Arc::new(MemoryStore::default());
        let svc = service(
            claude_text("Code:\nx"),
            store.clone(),
            Arc::new(MemoryAudit::default()),
            "ai21.j2-ultra-v1",
        );

        let err = svc.convert(&request()).await.unwrap_err();
        assert!(matches!(err, ConversionError::UnsupportedModel(id) if id == "ai21.j2-ultra-v1"));
        assert!(store.objects.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fenced_reply_without_marker() {
        let store = Arc::new(MemoryStore::default());
        let svc = service(
            claude_text("Sure!\n```go\npackage main\n```"),
            store,
            Arc::new(MemoryAudit::default()),
            CLAUDE,
        );

        let outcome = svc.convert(&request()).await.unwrap();
        assert_eq!(outcome.record.converted_code, "package main");
    }
}
