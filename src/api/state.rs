use std::sync::Arc;
use crate::{
    announcements::RotationRegistry,
    config::Settings,
    service::ServiceContext,
};

#[derive(Clone)]
pub struct AppState {
    pub service_context: Arc<ServiceContext>,
    pub settings: Arc<Settings>,
    pub banner_streams: Arc<RotationRegistry>,
}

impl AppState {
    pub fn new(service_context: Arc<ServiceContext>, settings: Arc<Settings>) -> Self {
        Self {
            service_context,
            settings,
            banner_streams: Arc::new(RotationRegistry::new()),
        }
    }

    pub fn dismissal_cookie(&self) -> &str {
        &self.settings.site.dismissal_cookie
    }
}
