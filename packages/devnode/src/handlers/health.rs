//! Liveness probe — `GET /health`.

use axum::Json;
use serde_json::{json, Value};

/// Always `{"status":"ok"}` while the process is serving.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
