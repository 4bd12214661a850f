//! Health and readiness endpoints / 健康与就绪检查接口

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;

use vins_api::search::SearchBackend;

use crate::state::AppState;

/// GET / — service banner / 服务信息
pub async fn root(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "message": "Auto Discovery VINs API",
        "service": state.config.service.name,
        "version": env!("CARGO_PKG_VERSION"),
        "build_time": env!("BUILD_TIME"),
        "endpoints": {
            "health": "/health",
            "ready": "/ready",
            "vins": "/api/vins/v1/vins",
            "vehicleInstances": "/api/vins/v1/vehicles/:vehicle_id/instances",
        },
    }))
}

/// GET /health — liveness, no backend involved / 存活检查
pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": state.service_name(),
        "timestamp": Utc::now().to_rfc3339(),
        "index": state.config.elasticsearch.index,
    }))
}

/// GET /ready — readiness probe, pings the search backend / 就绪检查
pub async fn ready(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match state.search.ping().await {
        Ok(()) => Ok(Json(json!({
            "status": "ready",
            "service": state.service_name(),
            "elasticsearch": "connected",
        }))),
        Err(e) => Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not ready",
                "service": state.service_name(),
                "elasticsearch": "disconnected",
                "error": e.to_string(),
            })),
        )),
    }
}
