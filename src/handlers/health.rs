use axum::{Json, extract::State, http::StatusCode};
use bson::doc;
use serde_json::{Value, json};

use crate::AppState;

/// GET /: welcome banner doubling as a liveness probe with a store ping.
pub async fn welcome(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let db_status = match state.db.run_command(doc! { "ping": 1 }).await {
        Ok(_) => "healthy",
        Err(e) => {
            tracing::error!(error = %e, "Store ping failed");
            "unhealthy"
        }
    };

    let status = if db_status == "healthy" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "message": "Welcome to Planet News Server",
            "database": db_status,
            "service": "planet-news-api",
        })),
    )
}
