//! Health check endpoints
//!
//! This module provides health check endpoints for monitoring
//! and container orchestration (Kubernetes, ECS, etc.)

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::server::state::AppState;

/// Response for the main health check endpoint
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub uptime_seconds: u64,
}

/// Response for readiness probe
#[derive(Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub checks: ReadinessChecks,
}

/// Individual readiness checks
#[derive(Debug, Serialize)]
pub struct ReadinessChecks {
    pub config_loaded: bool,
    pub bedrock: bool,
    pub s3: bool,
    pub dynamodb: bool,
}

/// Response for liveness probe
#[derive(Serialize)]
pub struct LivenessResponse {
    pub alive: bool,
}

/// Main health check endpoint
///
/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.settings.app_version.clone(),
        environment: state.settings.environment.to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}

/// Readiness probe endpoint
///
/// The synchronous route only needs Bedrock, so readiness does not depend on
/// S3 or DynamoDB; their status is reported for diagnostics.
///
/// GET /ready
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let aws_health = state.check_aws_health().await;

    let checks = ReadinessChecks {
        config_loaded: true,
        bedrock: aws_health.bedrock,
        s3: aws_health.s3,
        dynamodb: aws_health.dynamodb,
    };

    let ready = checks.config_loaded && checks.bedrock;

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    if !ready {
        tracing::warn!(checks = ?checks, "Service not ready");
    } else if !aws_health.all_healthy() {
        tracing::debug!(
            s3 = aws_health.s3,
            dynamodb = aws_health.dynamodb,
            "Persistence targets unavailable; event conversions will fail"
        );
    }

    (status, Json(ReadinessResponse { ready, checks }))
}

/// Liveness probe endpoint
///
/// GET /liveness
pub async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse { alive: true })
}
