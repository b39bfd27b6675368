use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;

use crate::{
    api::state::AppState,
    domain::ContactMessage,
    error::AppError,
    web::templates::HtmlTemplate,
};

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub site_name: String,
    pub csrf_token: String,
    pub sent: bool,
    pub error: Option<String>,
    pub form: ContactMessage,
}

#[derive(Debug, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub csrf_token: String,
}

// GET /contact
pub async fn contact_page(State(state): State<AppState>) -> impl IntoResponse {
    HtmlTemplate(ContactTemplate {
        site_name: state.settings.site.name.clone(),
        csrf_token: state.service_context.csrf_service.generate_token(),
        sent: false,
        error: None,
        form: ContactMessage::default(),
    })
}

// POST /contact
pub async fn contact_submit(
    State(state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> Response {
    let ctx = &state.service_context;
    let render = |status: StatusCode, sent: bool, error: Option<String>, form: ContactMessage| {
        (
            status,
            HtmlTemplate(ContactTemplate {
                site_name: state.settings.site.name.clone(),
                csrf_token: ctx.csrf_service.generate_token(),
                sent,
                error,
                form,
            }),
        )
            .into_response()
    };

    let message = ContactMessage {
        name: form.name,
        email: form.email,
        subject: form.subject,
        message: form.message,
    };

    if !ctx.csrf_service.validate_token(&form.csrf_token) {
        tracing::warn!("Contact form submitted with an invalid CSRF token");
        return render(
            StatusCode::FORBIDDEN,
            false,
            Some("Your session expired, please submit the form again.".to_string()),
            message,
        );
    }

    match ctx.contact_service.submit(message.clone()).await {
        Ok(()) => render(StatusCode::OK, true, None, ContactMessage::default()),
        Err(AppError::Validation(msg)) => render(StatusCode::BAD_REQUEST, false, Some(msg), message),
        Err(e) => {
            let msg = match e {
                AppError::Cms(msg) => msg,
                other => other.to_string(),
            };
            render(StatusCode::BAD_GATEWAY, false, Some(msg), message)
        }
    }
}
