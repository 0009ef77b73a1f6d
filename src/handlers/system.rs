use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / - service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "musicbox-api",
            "version": version,
            "description": "Users, music tracks, genres and playlists",
            "endpoints": {
                "user": "/user/signup, /user/login (public), /user/profile (token)",
                "music": "/music[/:id] (token), /music/genres (public)",
                "playlist": "/playlist, /playlist/create, /playlist/:id[/music] (token)",
                "health": "/health (public)",
            }
        }
    }))
}

/// GET /health - storage connectivity
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.database.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "SERVICE_UNAVAILABLE",
                    "message": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}
