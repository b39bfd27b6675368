use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use serde::Deserialize;

use super::banner::load_banner;
use crate::{
    api::state::AppState,
    domain::AnnouncementType,
    repository::AnnouncementFilter,
    web::templates::{
        not_found,
        views::{AnnouncementCard, BannerView, FilterLink},
        HtmlTemplate,
    },
};

const TYPE_FILTERS: [&str; 4] = ["event", "news", "alert", "update"];

#[derive(Template)]
#[template(path = "announcements.html")]
pub struct AnnouncementsTemplate {
    pub site_name: String,
    pub announcements: Vec<AnnouncementCard>,
    pub filters: Vec<FilterLink>,
    pub banner: Option<BannerView>,
    pub rotation_secs: u64,
}

#[derive(Template)]
#[template(path = "announcement_detail.html")]
pub struct AnnouncementDetailTemplate {
    pub site_name: String,
    pub announcement: AnnouncementCard,
}

#[derive(Debug, Deserialize)]
pub struct AnnouncementsPageQuery {
    #[serde(rename = "type")]
    pub announcement_type: Option<String>,
}

// GET /announcements
pub async fn announcements_page(
    State(state): State<AppState>,
    Query(query): Query<AnnouncementsPageQuery>,
    jar: CookieJar,
) -> impl IntoResponse {
    // Unknown types show everything rather than an error page.
    let announcement_type = query
        .announcement_type
        .as_deref()
        .and_then(AnnouncementType::parse);

    let filter = AnnouncementFilter {
        announcement_type,
        ..Default::default()
    };

    let (announcements, banner) = tokio::join!(
        state
            .service_context
            .announcement_service
            .active_sorted(filter, Utc::now()),
        load_banner(&state, jar, None),
    );

    let resolver = state.service_context.resolver.as_ref();
    HtmlTemplate(AnnouncementsTemplate {
        site_name: state.settings.site.name.clone(),
        announcements: announcements
            .iter()
            .map(|a| AnnouncementCard::new(a, resolver))
            .collect(),
        filters: FilterLink::build(
            "/announcements",
            "type",
            &TYPE_FILTERS,
            announcement_type.map(|t| t.as_str()).unwrap_or(""),
        ),
        banner,
        rotation_secs: state.settings.site.banner_rotation_secs,
    })
}

// GET /announcements/:slug
pub async fn announcement_detail_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Response {
    let announcement = state
        .service_context
        .announcement_service
        .find_active_by_slug(&slug, Utc::now())
        .await;

    match announcement {
        Some(announcement) => HtmlTemplate(AnnouncementDetailTemplate {
            site_name: state.settings.site.name.clone(),
            announcement: AnnouncementCard::new(&announcement, state.service_context.resolver.as_ref()),
        })
        .into_response(),
        None => not_found(&state.settings.site.name),
    }
}
