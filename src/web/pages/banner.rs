use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use serde::Deserialize;

use crate::{
    announcements::CookieStore,
    api::state::AppState,
    web::templates::{views::BannerView, HtmlTemplate},
};

#[derive(Template)]
#[template(path = "partials/banner.html")]
pub struct BannerTemplate {
    pub banner: Option<BannerView>,
    pub rotation_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct BannerQuery {
    /// Id of the banner currently on screen; the response is the one after it.
    pub after: Option<String>,
}

/// The banner for this visitor, honouring their dismissal cookie.
pub async fn load_banner(state: &AppState, jar: CookieJar, after: Option<&str>) -> Option<BannerView> {
    let store = Arc::new(CookieStore::new(jar));
    let mut rotation = state
        .service_context
        .announcement_service
        .banner(store, state.dismissal_cookie(), Utc::now())
        .await;

    if let Some(after) = after {
        rotation.resume_after(after);
    }

    let rotating = rotation.is_rotating();
    rotation.current().map(|a| BannerView::new(a, rotating))
}

// GET /partials/banner?after=<id>
pub async fn banner_partial(
    State(state): State<AppState>,
    Query(query): Query<BannerQuery>,
    jar: CookieJar,
) -> impl IntoResponse {
    let banner = load_banner(&state, jar, query.after.as_deref()).await;

    HtmlTemplate(BannerTemplate {
        banner,
        rotation_secs: state.settings.site.banner_rotation_secs,
    })
}
