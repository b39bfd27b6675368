use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use serde_json::{json, Value};

use crate::{
    api::state::AppState,
    domain::ContactMessage,
    error::{AppError, Result},
};

/// Thin relay to the CMS contacts collection.
pub async fn submit(
    State(state): State<AppState>,
    WithRejection(Json(message), _): WithRejection<Json<ContactMessage>, AppError>,
) -> Result<(StatusCode, Json<Value>)> {
    state.service_context.contact_service.submit(message).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Message sent successfully" })),
    ))
}
