use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::api::state::AppState;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "sousse",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn api_info(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "name": state.settings.site.name,
        "endpoints": {
            "announcements": "/api/announcements",
            "articles": "/api/articles",
            "products": "/api/products",
            "banner": "/api/banner",
            "banner_stream": "/api/banner/stream",
            "banner_dismiss": "/api/banner/:id/dismiss?stream=<token>",
            "contact": "/api/contact",
        }
    }))
}
