use axum::Json;

pub async fn ping() -> &'static str {
    "pong"
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
