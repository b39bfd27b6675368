use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Media;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PressCoverage {
    pub id: u64,
    pub title: String,
    pub outlet: String,
    pub url: String,
    #[serde(default)]
    pub published_on: Option<NaiveDate>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub logo: Option<Media>,
}
