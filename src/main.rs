use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sousse::{api, cms::CmsClient, config::Settings, service::ServiceContext};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sousse=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let settings = Settings::new().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config: {}. Using defaults.", e);
        Settings::default()
    });

    tracing::info!("Starting {} on {}:{}", settings.site.name, settings.server.host, settings.server.port);
    tracing::info!(
        "CMS internal endpoint {}, public endpoint {}",
        settings.cms.internal_url,
        settings.cms.public_url
    );

    if settings.site.csrf_secret == "change-me-in-production" {
        tracing::warn!("Using the default CSRF secret; set SOUSSE__SITE__CSRF_SECRET");
    }

    let client = Arc::new(CmsClient::from_config(&settings.cms)?);
    let service_context = Arc::new(ServiceContext::new(client, &settings.site.csrf_secret));

    let app = api::create_app(service_context, Arc::new(settings.clone()));

    let listener = tokio::net::TcpListener::bind(
        format!("{}:{}", settings.server.host, settings.server.port)
    ).await?;

    tracing::info!("Server listening on http://{}:{}", settings.server.host, settings.server.port);

    axum::serve(listener, app).await?;

    Ok(())
}
