pub mod handlers;
pub mod state;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};
use std::sync::Arc;

use crate::{
    config::Settings,
    service::ServiceContext,
    web,
};
use state::AppState;

pub fn create_app(service_context: Arc<ServiceContext>, settings: Arc<Settings>) -> Router {
    let app_state = AppState::new(service_context, settings);

    Router::new()
        // Health endpoints
        .route("/health", get(handlers::root::health_check))
        .route("/api", get(handlers::root::api_info))

        // JSON API
        .nest("/api", api_routes())

        // Public HTML site
        .merge(web::create_web_routes())

        // Add state to the router
        .with_state(app_state)

        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/announcements", get(handlers::announcements::list))
        .route("/announcements/:slug", get(handlers::announcements::get))
        .route("/articles", get(handlers::content::list_articles))
        .route("/products", get(handlers::content::list_products))
        .route("/banner", get(handlers::banner::current))
        .route("/banner/stream", get(handlers::banner::stream))
        .route("/banner/:id/dismiss", post(handlers::banner::dismiss))
        .route("/contact", post(handlers::contact::submit))
}
