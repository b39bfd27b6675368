pub mod pages;
pub mod templates;

use axum::{
    Router,
    routing::get,
};
use tower_http::services::ServeDir;

use crate::api::state::AppState;

pub fn create_web_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home::home_page))
        .route("/about", get(pages::home::about_page))

        // Announcements
        .route("/announcements", get(pages::announcements::announcements_page))
        .route("/announcements/:slug", get(pages::announcements::announcement_detail_page))
        .route("/partials/banner", get(pages::banner::banner_partial))

        // Articles, videos and photo albums
        .route("/articles", get(pages::articles::articles_page))
        .route("/articles/:slug", get(pages::articles::article_detail_page))
        .route("/videos", get(pages::articles::videos_page))
        .route("/albums", get(pages::articles::albums_page))

        // Shop and press
        .route("/products", get(pages::products::products_page))
        .route("/products/:slug", get(pages::products::product_detail_page))
        .route("/press", get(pages::press::press_page))

        // Contact form
        .route("/contact", get(pages::contact::contact_page).post(pages::contact::contact_submit))

        .nest_service("/static", ServeDir::new("static"))
        .fallback(pages::home::fallback)
}
