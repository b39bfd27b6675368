pub mod announcement_service;
pub mod contact_service;

use std::sync::Arc;
use crate::cms::{CmsClient, EndpointResolver};
use crate::repository::*;
use crate::security::CsrfService;
use announcement_service::AnnouncementService;
use contact_service::ContactService;

pub struct ServiceContext {
    pub announcement_repo: Arc<dyn AnnouncementRepository>,
    pub article_repo: Arc<dyn ArticleRepository>,
    pub product_repo: Arc<dyn ProductRepository>,
    pub press_repo: Arc<dyn PressRepository>,
    pub statistic_repo: Arc<dyn StatisticRepository>,
    pub announcement_service: Arc<AnnouncementService>,
    pub contact_service: Arc<ContactService>,
    pub csrf_service: Arc<CsrfService>,
    pub resolver: Arc<dyn EndpointResolver>,
}

impl ServiceContext {
    /// Wires every repository to the same CMS client.
    pub fn new(client: Arc<CmsClient>, csrf_secret: &str) -> Self {
        let announcement_repo: Arc<dyn AnnouncementRepository> =
            Arc::new(CmsAnnouncementRepository::new(client.clone()));
        let contact_repo: Arc<dyn ContactRepository> =
            Arc::new(CmsContactRepository::new(client.clone()));

        Self {
            announcement_service: Arc::new(AnnouncementService::new(announcement_repo.clone())),
            contact_service: Arc::new(ContactService::new(contact_repo)),
            announcement_repo,
            article_repo: Arc::new(CmsArticleRepository::new(client.clone())),
            product_repo: Arc::new(CmsProductRepository::new(client.clone())),
            press_repo: Arc::new(CmsPressRepository::new(client.clone())),
            statistic_repo: Arc::new(CmsStatisticRepository::new(client.clone())),
            csrf_service: Arc::new(CsrfService::new(csrf_secret)),
            resolver: client.resolver(),
        }
    }

    pub fn media_url(&self, raw: &str) -> String {
        self.resolver.media_url(raw)
    }
}
