use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cms::{CmsClient, ContentQuery, Direction},
    domain::{Article, Paginated},
    repository::{ArticleFilter, ArticleRepository},
};

const COLLECTION: &str = "articles";

pub struct CmsArticleRepository {
    client: Arc<CmsClient>,
}

impl CmsArticleRepository {
    pub fn new(client: Arc<CmsClient>) -> Self {
        Self { client }
    }

    fn build_query(filter: &ArticleFilter) -> ContentQuery {
        let mut query = ContentQuery::new();

        if let Some(category) = filter.category {
            query = query.eq("category", category.as_str());
        }
        if let Some(kind) = filter.kind {
            query = query.eq("kind", kind.as_str());
        }
        if let Some(ref slug) = filter.exclude_slug {
            query = query.ne("slug", slug.clone());
        }

        query
            .sort("publishedAt", Direction::Desc)
            .page(filter.page)
            .page_size(filter.page_size)
            .populate_all()
    }
}

#[async_trait]
impl ArticleRepository for CmsArticleRepository {
    async fn list(&self, filter: &ArticleFilter) -> Paginated<Article> {
        let query = Self::build_query(filter);
        self.client.list_or_empty(COLLECTION, &query).await
    }

    async fn find_by_slug(&self, slug: &str) -> Option<Article> {
        self.client.find_one(COLLECTION, "slug", slug).await
    }
}
