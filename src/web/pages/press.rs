use askama::Template;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{
    api::state::AppState,
    domain::DEFAULT_PAGE_SIZE,
    web::templates::{
        views::{PagerView, PressView},
        HtmlTemplate,
    },
};

#[derive(Template)]
#[template(path = "press.html")]
pub struct PressTemplate {
    pub site_name: String,
    pub items: Vec<PressView>,
    pub pager: PagerView,
}

#[derive(Debug, Deserialize)]
pub struct PressPageQuery {
    pub page: Option<u32>,
}

// GET /press
pub async fn press_page(
    State(state): State<AppState>,
    Query(query): Query<PressPageQuery>,
) -> impl IntoResponse {
    let page = state
        .service_context
        .press_repo
        .list(query.page.unwrap_or(1).max(1), DEFAULT_PAGE_SIZE)
        .await;

    let resolver = state.service_context.resolver.as_ref();
    HtmlTemplate(PressTemplate {
        site_name: state.settings.site.name.clone(),
        items: page.data.iter().map(|p| PressView::new(p, resolver)).collect(),
        pager: PagerView::new(&page.pagination, "/press", ""),
    })
}
