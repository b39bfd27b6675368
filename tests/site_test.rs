use std::sync::Arc;

use axum::{
    body::{to_bytes, Body, BodyDataStream},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use futures_util::StreamExt;
use mockito::{Matcher, Server, ServerGuard};
use serde_json::{json, Value};
use tower::ServiceExt;

use sousse::{api, cms::CmsClient, config::Settings, service::ServiceContext};

async fn setup(server: &ServerGuard) -> Router {
    let mut settings = Settings::default();
    settings.cms.internal_url = server.url();
    settings.cms.public_url = "https://cms.example.org".to_string();
    settings.cms.timeout_secs = 5;
    settings.site.csrf_secret = "test-secret".to_string();

    let client = Arc::new(CmsClient::from_config(&settings.cms).unwrap());
    let service_context = Arc::new(ServiceContext::new(client, &settings.site.csrf_secret));
    api::create_app(service_context, Arc::new(settings))
}

fn announcement(id: u64, priority: &str, start_hours_ago: i64, end_hours_ahead: Option<i64>) -> Value {
    let now = Utc::now();
    json!({
        "id": id,
        "title": format!("Announcement {}", id),
        "slug": format!("announcement-{}", id),
        "content": "Details",
        "type": "news",
        "priority": priority,
        "startDate": (now - Duration::hours(start_hours_ago)).to_rfc3339(),
        "endDate": end_hours_ahead.map(|h| (now + Duration::hours(h)).to_rfc3339()),
        "showOnHomepage": true
    })
}

async fn mock_announcements(server: &mut ServerGuard, records: Vec<Value>) -> mockito::Mock {
    server
        .mock("GET", "/api/announcements")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "data": records, "meta": {} }).to_string())
        .create_async()
        .await
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health() {
    let server = Server::new_async().await;
    let app = setup(&server).await;

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn test_announcements_hide_future_and_expired() {
    let mut server = Server::new_async().await;
    let _mock = mock_announcements(
        &mut server,
        vec![
            announcement(1, "normal", 2, None),
            announcement(2, "urgent", -3, None),
            announcement(3, "high", 48, Some(-1)),
            announcement(4, "high", 1, Some(5)),
        ],
    )
    .await;
    let app = setup(&server).await;

    let response = app.oneshot(get("/api/announcements")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let ids: Vec<u64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![4, 1]);
}

#[tokio::test]
async fn test_unknown_announcement_type_is_rejected() {
    let server = Server::new_async().await;
    let app = setup(&server).await;

    let response = app
        .oneshot(get("/api/announcements?type=gossip"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_banner_skips_dismissed_announcements() {
    let mut server = Server::new_async().await;
    let _mock = mock_announcements(
        &mut server,
        vec![
            announcement(2, "high", 2, None),
            announcement(1, "urgent", 1, None),
        ],
    )
    .await;
    let app = setup(&server).await;

    let response = app.clone().oneshot(get("/api/banner")).await.unwrap();
    assert_eq!(body_json(response).await["id"], 1);

    let request = Request::builder()
        .uri("/api/banner")
        .header(header::COOKIE, "dismissed_announcements=%5B%221%22%5D")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(body_json(response).await["id"], 2);
}

#[tokio::test]
async fn test_dismiss_sets_cookie_that_hides_the_banner() {
    let mut server = Server::new_async().await;
    let _mock = mock_announcements(&mut server, vec![announcement(5, "urgent", 1, None)]).await;
    let app = setup(&server).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/banner/5/dismiss")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("dismissed_announcements="));
    let pair = set_cookie.split(';').next().unwrap();

    let request = Request::builder()
        .uri("/api/banner")
        .header(header::COOKIE, pair)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(body_json(response).await, Value::Null);
}

#[tokio::test]
async fn test_dismiss_rejects_non_numeric_id() {
    let server = Server::new_async().await;
    let app = setup(&server).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/banner/abc/dismiss")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_banner_partial_resumes_after_previous() {
    let mut server = Server::new_async().await;
    let _mock = mock_announcements(
        &mut server,
        vec![
            announcement(1, "urgent", 1, None),
            announcement(2, "high", 2, None),
        ],
    )
    .await;
    let app = setup(&server).await;

    let response = app.oneshot(get("/partials/banner?after=1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Announcement 2"));
    assert!(html.contains("hx-get=\"/partials/banner?after=2\""));
}

#[tokio::test]
async fn test_cms_failure_degrades_to_empty_page() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/articles")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;
    let app = setup(&server).await;

    let response = app.oneshot(get("/api/articles?page=2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["pagination"]["page"], 2);
    assert_eq!(body["pagination"]["total"], 0);
}

#[tokio::test]
async fn test_home_page_renders_without_cms() {
    let server = Server::new_async().await;
    let app = setup(&server).await;

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("We Love Sousse"));
}

#[tokio::test]
async fn test_unknown_page_is_not_found() {
    let server = Server::new_async().await;
    let app = setup(&server).await;

    let response = app.oneshot(get("/no-such-page")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

fn contact_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_contact_relays_to_cms() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/contacts")
        .match_body(Matcher::PartialJson(json!({
            "data": { "email": "amel@example.org", "subject": "Volunteering" }
        })))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;
    let app = setup(&server).await;

    let response = app
        .oneshot(contact_request(json!({
            "name": "Amel",
            "email": " amel@example.org ",
            "subject": "Volunteering",
            "message": "How can I help?"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_contact_validation_error() {
    let server = Server::new_async().await;
    let app = setup(&server).await;

    let response = app
        .oneshot(contact_request(json!({ "name": "Amel", "email": "not-an-email" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await["error"].as_str().unwrap().to_string();
    assert!(error.contains("A valid email is required"));
    assert!(error.contains("Message is required"));
}

#[tokio::test]
async fn test_contact_relay_failure() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/contacts")
        .with_status(403)
        .create_async()
        .await;
    let app = setup(&server).await;

    let response = app
        .oneshot(contact_request(json!({
            "name": "Amel",
            "email": "amel@example.org",
            "subject": "Hello",
            "message": "Hi"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(
        body_json(response).await["error"],
        "Could not send your message, please try again later"
    );
}

#[tokio::test]
async fn test_contact_form_rejects_bad_csrf_token() {
    let server = Server::new_async().await;
    let app = setup(&server).await;

    let request = Request::builder()
        .method("POST")
        .uri("/contact")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(
            "name=Amel&email=amel%40example.org&subject=Hi&message=Hello&csrf_token=forged",
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_dismiss_rejects_announcement_not_on_banner() {
    let mut server = Server::new_async().await;
    let _mock = mock_announcements(&mut server, vec![announcement(5, "urgent", 1, None)]).await;
    let app = setup(&server).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/banner/42/dismiss")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_announcements_read_every_cms_page() {
    let mut server = Server::new_async().await;
    let pages = [
        (1, vec![announcement(10, "high", 1, Some(-1)), announcement(11, "normal", 2, Some(-1))]),
        (2, vec![announcement(3, "urgent", 400, None)]),
    ];
    let mut mocks = Vec::new();
    for (page, records) in pages {
        let mock = server
            .mock("GET", "/api/announcements")
            .match_query(Matcher::UrlEncoded("pagination[page]".into(), page.to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "data": records,
                    "meta": { "pagination": { "page": page, "pageSize": 2, "pageCount": 2, "total": 3 } }
                })
                .to_string(),
            )
            .create_async()
            .await;
        mocks.push(mock);
    }
    let app = setup(&server).await;

    let response = app.oneshot(get("/api/announcements")).await.unwrap();
    let body = body_json(response).await;
    let ids: Vec<u64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![3]);

    for mock in mocks {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_bad_json_body_gets_json_error() {
    let server = Server::new_async().await;
    let app = setup(&server).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_bad_query_gets_json_error() {
    let server = Server::new_async().await;
    let app = setup(&server).await;

    let response = app
        .oneshot(get("/api/announcements?homepage=yes"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

async fn read_until(body: &mut BodyDataStream, buffer: &mut String, needle: &str) {
    tokio::time::timeout(std::time::Duration::from_secs(5), async {
        while !buffer.contains(needle) {
            let chunk = body.next().await.unwrap().unwrap();
            buffer.push_str(std::str::from_utf8(&chunk).unwrap());
        }
    })
    .await
    .unwrap_or_else(|_| panic!("stream never sent {:?}, got {:?}", needle, buffer));
}

#[tokio::test]
async fn test_dismissal_clears_open_banner_stream() {
    let mut server = Server::new_async().await;
    let _mock = mock_announcements(
        &mut server,
        vec![
            announcement(1, "urgent", 1, None),
            announcement(2, "high", 2, None),
        ],
    )
    .await;
    let app = setup(&server).await;

    let response = app.clone().oneshot(get("/api/banner/stream")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let mut body = response.into_body().into_data_stream();

    let mut buffer = String::new();
    read_until(&mut body, &mut buffer, "\"id\":1,").await;
    let token = buffer
        .split("event: stream\ndata: ")
        .nth(1)
        .and_then(|rest| rest.lines().next())
        .unwrap()
        .to_string();

    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/banner/1/dismiss?stream={}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let mut buffer = String::new();
    read_until(&mut body, &mut buffer, "data: null").await;
    assert!(!buffer.contains("\"id\":2"));
}
