use super::build_router;
use crate::config::Config;
use crate::error::MISSING_API_KEY;
use crate::state::AppState;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use mockito::{Matcher, Server};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app(api_key: Option<&str>, base_url: &str) -> Router {
    let config = Config {
        port: 0,
        openai_api_key: api_key.map(String::from),
        openai_base_url: base_url.to_string(),
        cors_origins: vec!["https://demo.example".into()],
    };
    build_router(AppState::new(config).unwrap())
}

fn unconfigured() -> Router {
    app(None, "http://127.0.0.1:9")
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn multipart(file_name: &str, mime: &str, contents: &[u8]) -> Request<Body> {
    upload_request(file_name, mime, contents, false)
}

/// Same upload, with the `Content-Length` header a browser would send.
fn multipart_with_length(file_name: &str, mime: &str, contents: &[u8]) -> Request<Body> {
    upload_request(file_name, mime, contents, true)
}

fn upload_request(
    file_name: &str,
    mime: &str,
    contents: &[u8],
    content_length: bool,
) -> Request<Body> {
    let boundary = "XSUMMARIZERBOUNDARY";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {mime}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/ingest")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        );
    if content_length {
        builder = builder.header(header::CONTENT_LENGTH, body.len());
    }
    builder.body(Body::from(body)).unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, value)
}

#[tokio::test]
async fn missing_article_is_400() {
    for body in [r#"{}"#, r#"{"article":""}"#, r#"{"article":7}"#, "not json"] {
        let (status, _, json) = send(unconfigured(), post_json("/api/summarize", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(json, json!({"error": "Article text is required"}));
    }
}

#[tokio::test]
async fn missing_key_gives_the_same_error_for_any_article() {
    for article in ["short", "a much longer article about nothing in particular"] {
        let body = json!({"article": article, "temperature": 0.5}).to_string();
        let (status, _, json) = send(unconfigured(), post_json("/api/summarize", &body)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], MISSING_API_KEY);
    }
}

#[tokio::test]
async fn summarize_round_trip_through_provider() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-4o-mini",
            "temperature": 0.7,
            "max_tokens": 500
        })))
        .with_status(200)
        .with_body(
            r#"{"choices":[{"message":{"content":"A short summary."}}],
                "usage":{"prompt_tokens":40,"completion_tokens":4,"total_tokens":44}}"#,
        )
        .create_async()
        .await;

    let app = app(Some("sk-test"), &server.url());
    let (status, headers, json) =
        send(app, post_json("/api/summarize", r#"{"article":"Long article text."}"#)).await;

    mock.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["summary"], "A short summary.");
    assert_eq!(
        json["usage"],
        json!({"prompt_tokens": 40, "completion_tokens": 4, "total_tokens": 44})
    );
    assert_eq!(headers[header::CACHE_CONTROL], "no-store");
}

#[tokio::test]
async fn empty_choice_list_falls_back() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices":[]}"#)
        .create_async()
        .await;

    let (status, _, json) = send(
        app(Some("sk-test"), &server.url()),
        post_json("/api/summarize", r#"{"article":"text","temperature":0.1}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["summary"], "No summary generated");
}

#[tokio::test]
async fn provider_failure_is_500_with_message() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_body(r#"{"error":{"message":"Incorrect API key provided"}}"#)
        .create_async()
        .await;

    let (status, _, json) = send(
        app(Some("sk-bad"), &server.url()),
        post_json("/api/summarize", r#"{"article":"text"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({"error": "Incorrect API key provided"}));
}

#[tokio::test]
async fn estimate_endpoint_matches_estimator() {
    let body = json!({"article": "a".repeat(1000)}).to_string();
    let (status, _, json) = send(unconfigured(), post_json("/api/estimate", &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["input_tokens"], 270);
    assert_eq!(json["output_tokens"], 75);
    assert_eq!(json["total_tokens"], 345);
    assert_eq!(json["cost_display"], "$0.0001");
}

#[tokio::test]
async fn estimate_rejections_are_json_errors() {
    for body in [r#"{"article":42}"#, "not json"] {
        let (status, _, json) = send(unconfigured(), post_json("/api/estimate", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert!(json["error"].is_string(), "{body}: {json}");
    }
}

#[tokio::test]
async fn pdf_upload_is_unsupported_outcome() {
    let req = multipart("paper.pdf", "application/pdf", &[b'%'; 1024]);
    let (status, _, json) = send(unconfigured(), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "unsupported");
    assert_eq!(json["format"], "pdf");
    assert_eq!(json["file_name"], "paper.pdf");
}

#[tokio::test]
async fn text_upload_returns_contents() {
    let req = multipart("a.txt", "text/plain", b"uploaded article");
    let (status, _, json) = send(unconfigured(), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"status": "text", "file_name": "a.txt", "text": "uploaded article"}));
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let big = vec![b'a'; 6 * 1024 * 1024];
    let (status, _, json) = send(unconfigured(), multipart("big.txt", "text/plain", &big)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "File size must be less than 5MB");
}

#[tokio::test]
async fn ten_megabyte_upload_gets_the_size_message() {
    let big = vec![b'a'; 10 * 1024 * 1024];
    for req in [
        multipart("big.txt", "text/plain", &big),
        multipart_with_length("big.txt", "text/plain", &big),
    ] {
        let (status, _, json) = send(unconfigured(), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({"error": "File size must be less than 5MB"}));
    }
}

#[tokio::test]
async fn large_upload_of_wrong_type_reports_type() {
    let png = vec![0u8; 4 * 1024 * 1024];
    let (status, _, json) =
        send(unconfigured(), multipart_with_length("x.png", "image/png", &png)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Please upload a .txt, .pdf, or .docx file");
}

#[tokio::test]
async fn wrong_type_upload_is_rejected() {
    let (status, _, json) = send(unconfigured(), multipart("x.png", "image/png", b"png")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Please upload a .txt, .pdf, or .docx file");
}

#[tokio::test]
async fn home_page_renders() {
    let req = Request::builder().uri("/").body(Body::empty()).unwrap();
    let resp = unconfigured().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["x-frame-options"], "DENY");

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("gpt-4o-mini"));
    assert!(html.contains("OPENAI_API_KEY"));
}

#[tokio::test]
async fn health_reports_provider_state() {
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, _, json) = send(unconfigured(), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["provider_configured"], false);
}
