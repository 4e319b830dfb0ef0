//! Shared helpers for the HTTP integration tests.
//!
//! Every AWS collaborator is replaced by an in-memory double so the router
//! can be driven end to end with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use code_converter::config::Settings;
use code_converter::db::{AuditLog, AuditLogError, AuditRecord};
use code_converter::server::{create_router, AppState};
use code_converter::services::{BedrockError, ModelInvoker};
use code_converter::storage::{StorageError, TranscriptStore};

/// Model double returning a fixed body, or failing
pub struct ScriptedModel {
    reply: Result<Value, String>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<(String, Value)>>,
}

impl ScriptedModel {
    pub fn replying(reply: Value) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Model ids and decoded request bodies, in call order
    pub fn requests(&self) -> Vec<(String, Value)> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelInvoker for ScriptedModel {
    async fn invoke_model(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>, BedrockError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let request: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        self.prompts
            .lock()
            .unwrap()
            .push((model_id.to_string(), request));

        match &self.reply {
            Ok(reply) => Ok(serde_json::to_vec(reply).unwrap()),
            Err(message) => Err(BedrockError::ServiceUnavailable(message.clone())),
        }
    }
}

/// Transcript store double
#[derive(Default)]
pub struct MemoryStore {
    pub fail: bool,
    pub objects: Mutex<Vec<(String, String)>>,
}

impl MemoryStore {
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Self::default()
        })
    }

    pub fn count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait]
impl TranscriptStore for MemoryStore {
    async fn put_transcript(&self, key: &str, body: String) -> Result<(), StorageError> {
        if self.fail {
            return Err(StorageError::S3("NoSuchBucket".to_string()));
        }
        self.objects.lock().unwrap().push((key.to_string(), body));
        Ok(())
    }
}

/// Audit sink double
#[derive(Default)]
pub struct MemoryAudit {
    pub rows: Mutex<Vec<AuditRecord>>,
}

impl MemoryAudit {
    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl AuditLog for MemoryAudit {
    async fn record(&self, record: &AuditRecord) -> Result<(), AuditLogError> {
        self.rows.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// Router wired to the given doubles
pub struct TestApp {
    pub router: Router,
    pub model: Arc<ScriptedModel>,
    pub store: Arc<MemoryStore>,
    pub audit: Arc<MemoryAudit>,
}

pub fn build_test_app(model: Arc<ScriptedModel>, store: Arc<MemoryStore>) -> TestApp {
    let audit = Arc::new(MemoryAudit::default());
    let state = AppState::from_parts(
        Settings::default(),
        model.clone(),
        store.clone(),
        audit.clone(),
    );

    TestApp {
        router: create_router(state),
        model,
        store,
        audit,
    }
}

/// Titan-shaped reply carrying `text`
pub fn titan_reply(text: &str) -> Value {
    serde_json::json!({
        "inputTextTokenCount": 12,
        "results": [{"tokenCount": 8, "outputText": text, "completionReason": "FINISH"}]
    })
}

/// Claude-shaped reply carrying `text`
pub fn claude_reply(text: &str) -> Value {
    serde_json::json!({
        "id": "msg_01",
        "type": "message",
        "role": "assistant",
        "content": [{"type": "text", "text": text}],
        "stop_reason": "end_turn"
    })
}

pub async fn send(router: Router, method: Method, uri: &str, body: Body) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    router.oneshot(request).await.unwrap()
}

pub async fn get(router: Router, uri: &str) -> Response<Body> {
    send(router, Method::GET, uri, Body::empty()).await
}

pub async fn post_json(router: Router, uri: &str, body: &Value) -> Response<Body> {
    send(router, Method::POST, uri, Body::from(body.to_string())).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
