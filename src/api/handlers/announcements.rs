use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use serde::Deserialize;

use crate::{
    api::state::AppState,
    domain::{Announcement, AnnouncementType},
    error::{AppError, Result},
    repository::AnnouncementFilter,
};

#[derive(Debug, Deserialize)]
pub struct ListAnnouncementsQuery {
    #[serde(rename = "type")]
    pub announcement_type: Option<String>,
    pub homepage: Option<bool>,
}

pub async fn list(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<ListAnnouncementsQuery>, AppError>,
) -> Result<Json<Vec<Announcement>>> {
    let announcement_type = match params.announcement_type.as_deref() {
        None | Some("") | Some("all") => None,
        Some(raw) => Some(
            AnnouncementType::parse(raw)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown announcement type: {}", raw)))?,
        ),
    };

    let filter = AnnouncementFilter {
        announcement_type,
        homepage_only: params.homepage.unwrap_or(false),
        ..Default::default()
    };

    let mut announcements = state
        .service_context
        .announcement_service
        .active_sorted(filter.clone(), Utc::now())
        .await;

    if filter.homepage_only {
        announcements.retain(|a| a.show_on_homepage);
    }

    Ok(Json(announcements))
}

pub async fn get(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Announcement>> {
    let announcement = state
        .service_context
        .announcement_service
        .find_active_by_slug(&slug, Utc::now())
        .await
        .ok_or(AppError::NotFound("Announcement not found".to_string()))?;

    Ok(Json(announcement))
}
