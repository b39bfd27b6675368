use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    api::state::AppState,
    domain::{ArticleCategory, ArticleKind},
    repository::ArticleFilter,
    web::templates::{
        not_found,
        views::{ArticleCard, ArticleView, FilterLink, PagerView},
        HtmlTemplate,
    },
};

const RELATED_ARTICLES: u32 = 3;
const CATEGORY_FILTERS: [&str; 5] = ["news", "event", "project", "culture", "environment"];

#[derive(Template)]
#[template(path = "articles.html")]
pub struct ArticlesTemplate {
    pub site_name: String,
    pub heading: String,
    pub articles: Vec<ArticleCard>,
    pub filters: Vec<FilterLink>,
    pub pager: PagerView,
}

#[derive(Template)]
#[template(path = "article_detail.html")]
pub struct ArticleDetailTemplate {
    pub site_name: String,
    pub article: ArticleView,
    pub related: Vec<ArticleCard>,
}

#[derive(Debug, Deserialize)]
pub struct ArticlesPageQuery {
    pub category: Option<String>,
    pub page: Option<u32>,
}

// GET /articles
pub async fn articles_page(
    State(state): State<AppState>,
    Query(query): Query<ArticlesPageQuery>,
) -> impl IntoResponse {
    render_listing(&state, query, None, "News & stories", "/articles").await
}

// GET /videos
pub async fn videos_page(
    State(state): State<AppState>,
    Query(query): Query<ArticlesPageQuery>,
) -> impl IntoResponse {
    render_listing(&state, query, Some(ArticleKind::Video), "Videos", "/videos").await
}

// GET /albums
pub async fn albums_page(
    State(state): State<AppState>,
    Query(query): Query<ArticlesPageQuery>,
) -> impl IntoResponse {
    render_listing(&state, query, Some(ArticleKind::Album), "Photo albums", "/albums").await
}

async fn render_listing(
    state: &AppState,
    query: ArticlesPageQuery,
    kind: Option<ArticleKind>,
    heading: &str,
    path: &str,
) -> HtmlTemplate<ArticlesTemplate> {
    let category = query.category.as_deref().and_then(ArticleCategory::parse);
    let filter = ArticleFilter {
        category,
        kind,
        page: query.page.unwrap_or(1).max(1),
        ..Default::default()
    };

    let page = state.service_context.article_repo.list(&filter).await;
    let resolver = state.service_context.resolver.as_ref();

    let selected_category = category.map(|c| c.as_str().to_string()).unwrap_or_default();
    let extra = if selected_category.is_empty() {
        String::new()
    } else {
        format!("&category={}", selected_category)
    };

    HtmlTemplate(ArticlesTemplate {
        site_name: state.settings.site.name.clone(),
        heading: heading.to_string(),
        articles: page.data.iter().map(|a| ArticleCard::new(a, resolver)).collect(),
        filters: FilterLink::build(path, "category", &CATEGORY_FILTERS, &selected_category),
        pager: PagerView::new(&page.pagination, path, &extra),
    })
}

// GET /articles/:slug
pub async fn article_detail_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Response {
    let ctx = &state.service_context;
    let Some(article) = ctx.article_repo.find_by_slug(&slug).await else {
        return not_found(&state.settings.site.name);
    };

    let related_filter = ArticleFilter {
        category: Some(article.category),
        exclude_slug: Some(article.slug.clone()),
        page_size: RELATED_ARTICLES,
        ..Default::default()
    };
    let related = ctx.article_repo.list(&related_filter).await;

    let resolver = ctx.resolver.as_ref();
    HtmlTemplate(ArticleDetailTemplate {
        site_name: state.settings.site.name.clone(),
        article: ArticleView::new(&article, resolver),
        related: related.data.iter().map(|a| ArticleCard::new(a, resolver)).collect(),
    })
    .into_response()
}
