use std::{convert::Infallible, sync::Arc, time::Duration};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use axum_extra::extract::{cookie::CookieJar, WithRejection};
use chrono::Utc;
use futures_util::stream::{self, Stream, StreamExt};
use serde::Deserialize;

use crate::{
    announcements::{CookieStore, DismissalSet, RotationTimer},
    api::state::AppState,
    domain::Announcement,
    error::{AppError, Result},
};

/// What the banner should show for this visitor right now.
pub async fn current(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Json<Option<Announcement>> {
    let store = Arc::new(CookieStore::new(jar));
    let rotation = state
        .service_context
        .announcement_service
        .banner(store, state.dismissal_cookie(), Utc::now())
        .await;

    Json(rotation.current().cloned())
}

#[derive(Debug, Deserialize)]
pub struct DismissQuery {
    /// Token of an open banner stream that should drop the announcement too.
    pub stream: Option<String>,
}

/// Remembers the dismissal in the visitor's cookie. Only announcements that
/// could currently be on the banner are accepted, which keeps the cookie to
/// ids that really existed.
pub async fn dismiss(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Query(query), _): WithRejection<Query<DismissQuery>, AppError>,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode)> {
    if id.parse::<u64>().is_err() {
        return Err(AppError::BadRequest(format!("Invalid announcement id: {}", id)));
    }

    let candidates = state
        .service_context
        .announcement_service
        .banner_candidates(Utc::now())
        .await;
    if !candidates.iter().any(|a| a.dismissal_key() == id) {
        return Err(AppError::NotFound("Announcement not found".to_string()));
    }

    let store = Arc::new(CookieStore::new(jar));
    let mut dismissals = DismissalSet::load(store.clone(), state.dismissal_cookie());
    dismissals.dismiss(&id);

    if let Some(token) = query.stream.as_deref() {
        if !state.banner_streams.dismiss(token, &id).await {
            tracing::debug!("Banner stream {} is already closed", token);
        }
    }

    tracing::debug!("Visitor dismissed announcement {}", id);
    Ok((store.jar(), StatusCode::NO_CONTENT))
}

/// Pushes the banner every time the rotation moves on. The rotation timer
/// lives as long as the connection.
///
/// The first event (`stream`) carries a token; passing it as `?stream=` to
/// the dismiss endpoint applies the dismissal to this open stream.
pub async fn stream(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let store = Arc::new(CookieStore::new(jar));
    let rotation = state
        .service_context
        .announcement_service
        .banner(store, state.dismissal_cookie(), Utc::now())
        .await;

    let interval = Duration::from_secs(state.settings.site.banner_rotation_secs.max(1));
    let timer = Arc::new(RotationTimer::spawn(rotation, interval));
    let token = state.banner_streams.register(&timer);
    let receiver = timer.subscribe();

    let hello = Event::default().event("stream").data(token);
    let banners = stream::unfold((timer, receiver, true), |(timer, mut receiver, first)| async move {
        if !first && receiver.changed().await.is_err() {
            return None;
        }
        let current = receiver.borrow_and_update().clone();
        let event = Event::default()
            .event("banner")
            .json_data(&current)
            .unwrap_or_else(|_| Event::default().event("banner").data("null"));

        Some((Ok(event), (timer, receiver, false)))
    });

    let events = stream::once(async move { Ok::<_, Infallible>(hello) }).chain(banners);
    Sse::new(events).keep_alive(KeepAlive::default())
}
