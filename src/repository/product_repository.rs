use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cms::{CmsClient, ContentQuery, Direction},
    domain::{Paginated, Product},
    repository::ProductRepository,
};

const COLLECTION: &str = "products";

pub struct CmsProductRepository {
    client: Arc<CmsClient>,
}

impl CmsProductRepository {
    pub fn new(client: Arc<CmsClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProductRepository for CmsProductRepository {
    async fn list(&self, category: Option<&str>, page: u32, page_size: u32) -> Paginated<Product> {
        let mut query = ContentQuery::new();
        if let Some(category) = category.filter(|c| !c.is_empty()) {
            query = query.eq("category", category);
        }
        let query = query
            .sort("name", Direction::Asc)
            .page(page)
            .page_size(page_size)
            .populate_all();

        self.client.list_or_empty(COLLECTION, &query).await
    }

    async fn find_by_slug(&self, slug: &str) -> Option<Product> {
        self.client.find_one(COLLECTION, "slug", slug).await
    }
}
