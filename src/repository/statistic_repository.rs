use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cms::{CmsClient, ContentQuery, Direction},
    domain::Statistic,
    repository::StatisticRepository,
};

const COLLECTION: &str = "statistics";

pub struct CmsStatisticRepository {
    client: Arc<CmsClient>,
}

impl CmsStatisticRepository {
    pub fn new(client: Arc<CmsClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StatisticRepository for CmsStatisticRepository {
    async fn list(&self) -> Vec<Statistic> {
        let query = ContentQuery::new()
            .sort("order", Direction::Asc)
            .page_size(20);

        self.client.list_or_empty(COLLECTION, &query).await.data
    }
}
