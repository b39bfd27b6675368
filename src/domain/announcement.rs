use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Media;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: u64,
    #[serde(default)]
    pub document_id: Option<String>,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "type")]
    pub announcement_type: AnnouncementType,
    #[serde(default)]
    pub priority: Priority,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub show_on_homepage: bool,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub link_text: Option<String>,
    #[serde(default)]
    pub image: Option<Media>,
}

impl Announcement {
    /// Key used in the dismissal set.
    pub fn dismissal_key(&self) -> String {
        self.id.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementType {
    Event,
    News,
    Alert,
    Update,
}

impl AnnouncementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnouncementType::Event => "event",
            AnnouncementType::News => "news",
            AnnouncementType::Alert => "alert",
            AnnouncementType::Update => "update",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "event" => Some(AnnouncementType::Event),
            "news" => Some(AnnouncementType::News),
            "alert" => Some(AnnouncementType::Alert),
            "update" => Some(AnnouncementType::Update),
            _ => None,
        }
    }
}

/// Display precedence. Variants are declared lowest first so the derived
/// `Ord` gives `Urgent > High > Normal > Info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Info,
    #[default]
    Normal,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Info => "info",
            Priority::Normal => "normal",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}
