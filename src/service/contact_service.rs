use std::sync::Arc;

use validator::{Validate, ValidationErrors};

use crate::{
    domain::ContactMessage,
    error::{AppError, Result},
    repository::ContactRepository,
};

pub const RELAY_FAILURE_MESSAGE: &str = "Could not send your message, please try again later";

/// Checks contact form submissions and relays them to the CMS.
pub struct ContactService {
    repo: Arc<dyn ContactRepository>,
}

impl ContactService {
    pub fn new(repo: Arc<dyn ContactRepository>) -> Self {
        Self { repo }
    }

    pub async fn submit(&self, message: ContactMessage) -> Result<()> {
        let message = message.trimmed();
        message
            .validate()
            .map_err(|e| AppError::Validation(describe(&e)))?;

        self.repo.create(&message).await.map_err(|e| {
            tracing::error!("Failed to relay contact message: {}", e);
            AppError::Cms(RELAY_FAILURE_MESSAGE.to_string())
        })?;

        tracing::info!("Contact message relayed ({})", message.subject);
        Ok(())
    }
}

fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}
