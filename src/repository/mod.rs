use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crate::domain::*;
use crate::error::Result;

pub mod announcement_repository;
pub mod article_repository;
pub mod contact_repository;
pub mod press_repository;
pub mod product_repository;
pub mod statistic_repository;

pub use announcement_repository::CmsAnnouncementRepository;
pub use article_repository::CmsArticleRepository;
pub use contact_repository::CmsContactRepository;
pub use press_repository::CmsPressRepository;
pub use product_repository::CmsProductRepository;
pub use statistic_repository::CmsStatisticRepository;

#[derive(Debug, Clone, Default)]
pub struct AnnouncementFilter {
    pub announcement_type: Option<AnnouncementType>,
    /// Restrict to any of these types. Ignored when empty.
    pub types: Vec<AnnouncementType>,
    pub homepage_only: bool,
    /// Only records whose window contains this instant.
    pub active_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct ArticleFilter {
    pub category: Option<ArticleCategory>,
    pub kind: Option<ArticleKind>,
    pub exclude_slug: Option<String>,
    pub page: u32,
    pub page_size: u32,
}

impl Default for ArticleFilter {
    fn default() -> Self {
        Self {
            category: None,
            kind: None,
            exclude_slug: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

// Listing never fails: an unavailable CMS reads as an empty collection.

#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    async fn list(&self, filter: &AnnouncementFilter) -> Vec<Announcement>;
    async fn find_by_slug(&self, slug: &str) -> Option<Announcement>;
}

#[async_trait]
pub trait ArticleRepository: Send + Sync {
    async fn list(&self, filter: &ArticleFilter) -> Paginated<Article>;
    async fn find_by_slug(&self, slug: &str) -> Option<Article>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list(&self, category: Option<&str>, page: u32, page_size: u32) -> Paginated<Product>;
    async fn find_by_slug(&self, slug: &str) -> Option<Product>;
}

#[async_trait]
pub trait PressRepository: Send + Sync {
    async fn list(&self, page: u32, page_size: u32) -> Paginated<PressCoverage>;
}

#[async_trait]
pub trait StatisticRepository: Send + Sync {
    async fn list(&self) -> Vec<Statistic>;
}

#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create(&self, message: &ContactMessage) -> Result<()>;
}
