use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    api::state::AppState,
    domain::DEFAULT_PAGE_SIZE,
    web::templates::{
        not_found,
        views::{PagerView, ProductCard},
        HtmlTemplate,
    },
};

#[derive(Template)]
#[template(path = "products.html")]
pub struct ProductsTemplate {
    pub site_name: String,
    pub products: Vec<ProductCard>,
    pub category: String,
    pub pager: PagerView,
}

#[derive(Template)]
#[template(path = "product_detail.html")]
pub struct ProductDetailTemplate {
    pub site_name: String,
    pub product: ProductCard,
}

#[derive(Debug, Deserialize)]
pub struct ProductsPageQuery {
    pub category: Option<String>,
    pub page: Option<u32>,
}

// GET /products
pub async fn products_page(
    State(state): State<AppState>,
    Query(query): Query<ProductsPageQuery>,
) -> impl IntoResponse {
    let category = query.category.unwrap_or_default();
    let page = state
        .service_context
        .product_repo
        .list(Some(category.as_str()), query.page.unwrap_or(1).max(1), DEFAULT_PAGE_SIZE)
        .await;

    let extra = if category.is_empty() {
        String::new()
    } else {
        format!("&category={}", urlencoding::encode(&category))
    };

    let resolver = state.service_context.resolver.as_ref();
    HtmlTemplate(ProductsTemplate {
        site_name: state.settings.site.name.clone(),
        products: page.data.iter().map(|p| ProductCard::new(p, resolver)).collect(),
        pager: PagerView::new(&page.pagination, "/products", &extra),
        category,
    })
}

// GET /products/:slug
pub async fn product_detail_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Response {
    match state.service_context.product_repo.find_by_slug(&slug).await {
        Some(product) => HtmlTemplate(ProductDetailTemplate {
            site_name: state.settings.site.name.clone(),
            product: ProductCard::new(&product, state.service_context.resolver.as_ref()),
        })
        .into_response(),
        None => not_found(&state.settings.site.name),
    }
}
