use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cms::{CmsClient, ContentQuery, Direction},
    domain::Announcement,
    repository::{AnnouncementFilter, AnnouncementRepository},
};

const COLLECTION: &str = "announcements";

/// Page size for announcement reads; every page is fetched.
const ANNOUNCEMENTS_PAGE_SIZE: u32 = 100;

pub struct CmsAnnouncementRepository {
    client: Arc<CmsClient>,
}

impl CmsAnnouncementRepository {
    pub fn new(client: Arc<CmsClient>) -> Self {
        Self { client }
    }

    fn build_query(filter: &AnnouncementFilter) -> ContentQuery {
        let mut query = ContentQuery::new();

        if let Some(announcement_type) = filter.announcement_type {
            query = query.eq("type", announcement_type.as_str());
        }
        if !filter.types.is_empty() {
            query = query.in_values("type", filter.types.iter().map(|t| t.as_str()));
        }
        if filter.homepage_only {
            query = query.eq("showOnHomepage", "true");
        }
        if let Some(at) = filter.active_at {
            let at = at.to_rfc3339();
            query = query
                .lte("startDate", at.clone())
                .null_or_gte("endDate", at);
        }

        query
            .sort("startDate", Direction::Desc)
            .page_size(ANNOUNCEMENTS_PAGE_SIZE)
            .populate_all()
    }
}

#[async_trait]
impl AnnouncementRepository for CmsAnnouncementRepository {
    async fn list(&self, filter: &AnnouncementFilter) -> Vec<Announcement> {
        let query = Self::build_query(filter);
        self.client.list_all_or_empty(COLLECTION, &query).await
    }

    async fn find_by_slug(&self, slug: &str) -> Option<Announcement> {
        self.client.find_one(COLLECTION, "slug", slug).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AnnouncementType;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_query_for_homepage_events() {
        let filter = AnnouncementFilter {
            announcement_type: Some(AnnouncementType::Event),
            types: Vec::new(),
            homepage_only: true,
            active_at: Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()),
        };

        let pairs = CmsAnnouncementRepository::build_query(&filter).to_pairs();
        let find = |key: &str| pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str());

        assert_eq!(find("filters[type][$eq]"), Some("event"));
        assert_eq!(find("filters[showOnHomepage][$eq]"), Some("true"));
        assert_eq!(find("filters[startDate][$lte]"), Some("2024-05-01T12:00:00+00:00"));
        assert_eq!(find("filters[$or][0][endDate][$null]"), Some("true"));
        assert_eq!(find("filters[$or][1][endDate][$gte]"), Some("2024-05-01T12:00:00+00:00"));
        assert_eq!(find("sort[0]"), Some("startDate:desc"));
    }

    #[test]
    fn test_query_for_type_set() {
        let filter = AnnouncementFilter {
            types: vec![AnnouncementType::Alert, AnnouncementType::Update],
            ..Default::default()
        };

        let pairs = CmsAnnouncementRepository::build_query(&filter).to_pairs();
        assert!(pairs.contains(&("filters[type][$in][0]".to_string(), "alert".to_string())));
        assert!(pairs.contains(&("filters[type][$in][1]".to_string(), "update".to_string())));
        assert!(!pairs.iter().any(|(k, _)| k.contains("showOnHomepage")));
    }
}
