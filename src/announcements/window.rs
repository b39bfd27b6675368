use chrono::{DateTime, Utc};

use crate::domain::Announcement;

/// A record that is only current between a start instant and an optional end.
pub trait ActiveWindow {
    fn starts_at(&self) -> DateTime<Utc>;
    fn ends_at(&self) -> Option<DateTime<Utc>>;
}

impl ActiveWindow for Announcement {
    fn starts_at(&self) -> DateTime<Utc> {
        self.start_date
    }

    fn ends_at(&self) -> Option<DateTime<Utc>> {
        self.end_date
    }
}

/// Both bounds are inclusive: a record is still active at its exact end instant.
pub fn is_active<T: ActiveWindow>(record: &T, now: DateTime<Utc>) -> bool {
    if record.starts_at() > now {
        return false;
    }
    match record.ends_at() {
        Some(end) => end >= now,
        None => true,
    }
}

/// Keeps the active records, preserving input order.
pub fn filter_active<T: ActiveWindow>(records: Vec<T>, now: DateTime<Utc>) -> Vec<T> {
    records
        .into_iter()
        .filter(|r| is_active(r, now))
        .collect()
}
