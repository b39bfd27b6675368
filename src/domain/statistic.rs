use serde::{Deserialize, Serialize};

/// A headline figure shown on the homepage ("120 volunteers").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistic {
    pub id: u64,
    pub label: String,
    pub value: f64,
    #[serde(default)]
    pub suffix: Option<String>,
    #[serde(default)]
    pub order: i32,
}

impl Statistic {
    pub fn display_value(&self) -> String {
        let value = if self.value.fract() == 0.0 {
            format!("{}", self.value as i64)
        } else {
            format!("{}", self.value)
        };
        match &self.suffix {
            Some(suffix) => format!("{}{}", value, suffix),
            None => value,
        }
    }
}
