use axum::{
    extract::{Query, State},
    Json,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use crate::{
    api::state::AppState,
    domain::{Article, ArticleCategory, ArticleKind, Paginated, Product, DEFAULT_PAGE_SIZE},
    error::{AppError, Result},
    repository::ArticleFilter,
};

const MAX_PAGE_SIZE: u32 = 50;

#[derive(Debug, Deserialize)]
pub struct ListArticlesQuery {
    pub category: Option<String>,
    pub kind: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    pub category: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

pub async fn list_articles(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<ListArticlesQuery>, AppError>,
) -> Result<Json<Paginated<Article>>> {
    let category = match params.category.as_deref().filter(|c| !c.is_empty()) {
        Some(raw) => Some(
            ArticleCategory::parse(raw)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown category: {}", raw)))?,
        ),
        None => None,
    };
    let kind = match params.kind.as_deref().filter(|k| !k.is_empty()) {
        Some(raw) => Some(
            ArticleKind::parse(raw)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown kind: {}", raw)))?,
        ),
        None => None,
    };

    let filter = ArticleFilter {
        category,
        kind,
        exclude_slug: None,
        page: params.page.unwrap_or(1).max(1),
        page_size: page_size(params.page_size),
    };

    Ok(Json(state.service_context.article_repo.list(&filter).await))
}

pub async fn list_products(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<ListProductsQuery>, AppError>,
) -> Json<Paginated<Product>> {
    let products = state
        .service_context
        .product_repo
        .list(
            params.category.as_deref(),
            params.page.unwrap_or(1).max(1),
            page_size(params.page_size),
        )
        .await;

    Json(products)
}

fn page_size(requested: Option<u32>) -> u32 {
    requested.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}
