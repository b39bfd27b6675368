use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Media;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: u64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: String,
    pub category: ArticleCategory,
    #[serde(default)]
    pub kind: ArticleKind,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub cover: Option<Media>,
    #[serde(default)]
    pub gallery: Vec<Media>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleCategory {
    News,
    Event,
    Project,
    Culture,
    Environment,
}

impl ArticleCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleCategory::News => "news",
            ArticleCategory::Event => "event",
            ArticleCategory::Project => "project",
            ArticleCategory::Culture => "culture",
            ArticleCategory::Environment => "environment",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "news" => Some(ArticleCategory::News),
            "event" => Some(ArticleCategory::Event),
            "project" => Some(ArticleCategory::Project),
            "culture" => Some(ArticleCategory::Culture),
            "environment" => Some(ArticleCategory::Environment),
            _ => None,
        }
    }
}

/// How an article is presented: a regular post, a video page or a photo album.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArticleKind {
    #[default]
    Article,
    Video,
    Album,
}

impl ArticleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleKind::Article => "article",
            ArticleKind::Video => "video",
            ArticleKind::Album => "album",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "article" => Some(ArticleKind::Article),
            "video" => Some(ArticleKind::Video),
            "album" => Some(ArticleKind::Album),
            _ => None,
        }
    }
}
