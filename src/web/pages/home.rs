use askama::Template;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;

use super::banner::load_banner;
use crate::{
    api::state::AppState,
    repository::ArticleFilter,
    web::templates::{
        not_found,
        views::{AnnouncementCard, ArticleCard, BannerView, StatView},
        HtmlTemplate,
    },
};

const HOMEPAGE_ANNOUNCEMENTS: usize = 3;
const HOMEPAGE_ARTICLES: u32 = 3;

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub site_name: String,
    pub stats: Vec<StatView>,
    pub announcements: Vec<AnnouncementCard>,
    pub articles: Vec<ArticleCard>,
    pub banner: Option<BannerView>,
    pub rotation_secs: u64,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub site_name: String,
}

// GET /
pub async fn home_page(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let ctx = &state.service_context;
    let now = Utc::now();
    let article_filter = ArticleFilter {
        page_size: HOMEPAGE_ARTICLES,
        ..Default::default()
    };

    // Each section degrades to empty on its own.
    let (stats, announcements, articles, banner) = tokio::join!(
        ctx.statistic_repo.list(),
        ctx.announcement_service.homepage(now, HOMEPAGE_ANNOUNCEMENTS),
        ctx.article_repo.list(&article_filter),
        load_banner(&state, jar, None),
    );

    let resolver = ctx.resolver.as_ref();
    HtmlTemplate(HomeTemplate {
        site_name: state.settings.site.name.clone(),
        stats: stats.iter().map(StatView::from).collect(),
        announcements: announcements
            .iter()
            .map(|a| AnnouncementCard::new(a, resolver))
            .collect(),
        articles: articles
            .data
            .iter()
            .map(|a| ArticleCard::new(a, resolver))
            .collect(),
        banner,
        rotation_secs: state.settings.site.banner_rotation_secs,
    })
}

// GET /about
pub async fn about_page(State(state): State<AppState>) -> impl IntoResponse {
    HtmlTemplate(AboutTemplate {
        site_name: state.settings.site.name.clone(),
    })
}

pub async fn fallback(State(state): State<AppState>) -> Response {
    not_found(&state.settings.site.name)
}
