use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cms::CmsClient,
    domain::ContactMessage,
    error::Result,
    repository::ContactRepository,
};

const COLLECTION: &str = "contacts";

pub struct CmsContactRepository {
    client: Arc<CmsClient>,
}

impl CmsContactRepository {
    pub fn new(client: Arc<CmsClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContactRepository for CmsContactRepository {
    async fn create(&self, message: &ContactMessage) -> Result<()> {
        self.client.create(COLLECTION, message).await
    }
}
