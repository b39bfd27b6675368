use serde::{Deserialize, Serialize};
use validator::Validate;

/// A message left through the site's contact form. Missing fields deserialize
/// as empty strings so they are reported by validation, not by the parser.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ContactMessage {
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

impl ContactMessage {
    /// Strip surrounding whitespace so blank fields fail the length checks.
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }
}
