use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    announcements::{
        filter_active, is_active, sort_for_display, BannerRotation, DismissalSet, KeyValueStore,
    },
    domain::Announcement,
    repository::{AnnouncementFilter, AnnouncementRepository},
};

pub struct AnnouncementService {
    repo: Arc<dyn AnnouncementRepository>,
}

impl AnnouncementService {
    pub fn new(repo: Arc<dyn AnnouncementRepository>) -> Self {
        Self { repo }
    }

    /// Announcements live at `now`, in the order the CMS returned them.
    /// The window filter is also sent to the CMS, but the local check is the
    /// one that counts.
    pub async fn active(&self, filter: AnnouncementFilter, now: DateTime<Utc>) -> Vec<Announcement> {
        let filter = AnnouncementFilter {
            active_at: Some(now),
            ..filter
        };
        let announcements = self.repo.list(&filter).await;
        filter_active(announcements, now)
    }

    /// Live announcements in display order.
    pub async fn active_sorted(&self, filter: AnnouncementFilter, now: DateTime<Utc>) -> Vec<Announcement> {
        let mut announcements = self.active(filter, now).await;
        sort_for_display(&mut announcements);
        announcements
    }

    pub async fn homepage(&self, now: DateTime<Utc>, limit: usize) -> Vec<Announcement> {
        let filter = AnnouncementFilter {
            homepage_only: true,
            ..Default::default()
        };
        let mut announcements = self.active_sorted(filter, now).await;
        announcements.retain(|a| a.show_on_homepage);
        announcements.truncate(limit);
        announcements
    }

    pub async fn banner_candidates(&self, now: DateTime<Utc>) -> Vec<Announcement> {
        self.active_sorted(AnnouncementFilter::default(), now).await
    }

    /// Builds the banner rotation for one visitor, reading their dismissals
    /// from `store` under `key`.
    pub async fn banner(
        &self,
        store: Arc<dyn KeyValueStore>,
        key: &str,
        now: DateTime<Utc>,
    ) -> BannerRotation {
        let candidates = self.banner_candidates(now).await;
        BannerRotation::new(candidates, DismissalSet::load(store, key))
    }

    /// Detail lookup. Expired or not-yet-started announcements are not found.
    pub async fn find_active_by_slug(&self, slug: &str, now: DateTime<Utc>) -> Option<Announcement> {
        self.repo
            .find_by_slug(slug)
            .await
            .filter(|a| is_active(a, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::announcements::{MemoryStore, DISMISSAL_KEY};
    use crate::domain::{AnnouncementType, Priority};
    use async_trait::async_trait;
    use chrono::Duration;

    struct FakeRepo {
        announcements: Vec<Announcement>,
    }

    #[async_trait]
    impl AnnouncementRepository for FakeRepo {
        async fn list(&self, filter: &AnnouncementFilter) -> Vec<Announcement> {
            self.announcements
                .iter()
                .filter(|a| !filter.homepage_only || a.show_on_homepage)
                .cloned()
                .collect()
        }

        async fn find_by_slug(&self, slug: &str) -> Option<Announcement> {
            self.announcements.iter().find(|a| a.slug == slug).cloned()
        }
    }

    fn announcement(
        id: u64,
        priority: Priority,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
        homepage: bool,
    ) -> Announcement {
        Announcement {
            id,
            document_id: None,
            title: format!("Announcement {}", id),
            slug: format!("announcement-{}", id),
            excerpt: None,
            content: String::new(),
            announcement_type: AnnouncementType::Alert,
            priority,
            start_date: start,
            end_date: end,
            show_on_homepage: homepage,
            link: None,
            link_text: None,
            image: None,
        }
    }

    fn service(announcements: Vec<Announcement>) -> AnnouncementService {
        AnnouncementService::new(Arc::new(FakeRepo { announcements }))
    }

    #[tokio::test]
    async fn test_banner_scenario() {
        let t = Utc::now();
        let service = service(vec![
            announcement(2, Priority::Normal, t - Duration::hours(2), None, false),
            announcement(1, Priority::Urgent, t - Duration::hours(1), None, false),
            announcement(3, Priority::Urgent, t + Duration::hours(1), None, false),
        ]);

        let candidates = service.banner_candidates(t).await;
        let order: Vec<u64> = candidates.iter().map(|a| a.id).collect();
        assert_eq!(order, vec![1, 2]);

        let store = Arc::new(MemoryStore::new());
        let rotation = service.banner(store.clone(), DISMISSAL_KEY, t).await;
        assert_eq!(rotation.current().map(|a| a.id), Some(1));

        store.set(DISMISSAL_KEY, r#"["1"]"#.to_string());
        let rotation = service.banner(store, DISMISSAL_KEY, t).await;
        assert_eq!(rotation.current().map(|a| a.id), Some(2));
    }

    #[tokio::test]
    async fn test_homepage_only_active_flagged_and_limited() {
        let t = Utc::now();
        let service = service(vec![
            announcement(1, Priority::Info, t - Duration::days(1), None, true),
            announcement(2, Priority::High, t - Duration::days(1), Some(t - Duration::hours(1)), true),
            announcement(3, Priority::Urgent, t - Duration::days(1), None, false),
            announcement(4, Priority::High, t - Duration::days(2), Some(t + Duration::days(1)), true),
            announcement(5, Priority::Normal, t - Duration::days(3), None, true),
        ]);

        let ids: Vec<u64> = service.homepage(t, 2).await.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![4, 5]);
    }

    #[tokio::test]
    async fn test_find_active_by_slug() {
        let t = Utc::now();
        let service = service(vec![
            announcement(1, Priority::Info, t - Duration::days(1), None, false),
            announcement(2, Priority::Info, t + Duration::days(1), None, false),
        ]);

        assert!(service.find_active_by_slug("announcement-1", t).await.is_some());
        assert!(service.find_active_by_slug("announcement-2", t).await.is_none());
        assert!(service.find_active_by_slug("missing", t).await.is_none());
    }
}
