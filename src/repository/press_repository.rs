use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cms::{CmsClient, ContentQuery, Direction},
    domain::{Paginated, PressCoverage},
    repository::PressRepository,
};

const COLLECTION: &str = "press-coverages";

pub struct CmsPressRepository {
    client: Arc<CmsClient>,
}

impl CmsPressRepository {
    pub fn new(client: Arc<CmsClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PressRepository for CmsPressRepository {
    async fn list(&self, page: u32, page_size: u32) -> Paginated<PressCoverage> {
        let query = ContentQuery::new()
            .sort("publishedOn", Direction::Desc)
            .page(page)
            .page_size(page_size)
            .populate_all();

        self.client.list_or_empty(COLLECTION, &query).await
    }
}
