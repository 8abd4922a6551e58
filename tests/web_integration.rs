#![cfg(feature = "web")]

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use common::{create_file, numbered_log};
use http_body_util::BodyExt; // Requires http-body-util in dev-dependencies
use logview::config::ConfigBuilder;
use logview::web::{create_router, SearchRequest};
use serde_json::Value;
use tempfile::{tempdir, TempDir};
use tower::util::ServiceExt; // for oneshot

fn bundle() -> (TempDir, Router) {
    let temp = tempdir().unwrap();
    create_file(
        temp.path(),
        "logs/app.log",
        "2024-01-01 10:00:00 ERROR db down at 10.0.0.7\n2024-01-01 10:00:01 INFO ok\n",
    )
    .unwrap();
    create_file(temp.path(), "logs/big.log", &numbered_log(2500)).unwrap();
    create_file(temp.path(), "state.json", r#"{"b":2,"a":1}"#).unwrap();
    std::fs::write(temp.path().join("core.bin"), [0u8, 1, 2, 3, 0, 0]).unwrap();

    let config = ConfigBuilder::new()
        .root(temp.path())
        .page_size(1000)
        .pagination_threshold(2000)
        .build()
        .unwrap();
    let app = create_router(config).unwrap();
    (temp, app)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

async fn post_search(app: Router, path: &str, query: &str) -> (StatusCode, Value) {
    let payload = SearchRequest {
        path: path.to_string(),
        query: query.to_string(),
    };
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/search")
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::to_string(&payload).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_web_static_index() {
    let (_temp, app) = bundle();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body_str = String::from_utf8_lossy(&body);
    assert!(body_str.contains("<title>logview</title>"));
}

async fn asset(app: Router, uri: &str) -> (StatusCode, String, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let mime = response
        .headers()
        .get("content-type")
        .map(|v| v.to_str().unwrap().to_string())
        .unwrap_or_default();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, mime, String::from_utf8_lossy(&body).into_owned())
}

#[tokio::test]
async fn test_web_toolbar_and_tree_filter_assets() {
    let (_temp, app) = bundle();

    let (status, _, index) = asset(app.clone(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(index.contains("id=\"lineCount\""));
    assert!(index.contains("id=\"copyContent\""));

    let (status, mime, script) = asset(app, "/app.js").await;
    assert_eq!(status, StatusCode::OK);
    assert!(mime.contains("javascript"));
    // Matches inside collapsed folders expand their ancestors.
    assert!(script.contains("if (visible) setFolderExpanded(node, true);"));
    assert!(script.contains("showing ${state.shownLines} / ${view.line_count} lines"));
    assert!(script.contains("navigator.clipboard.writeText(payload.content)"));
}

#[tokio::test]
async fn test_web_unknown_asset_is_404() {
    let (_temp, app) = bundle();
    let response = app
        .oneshot(Request::builder().uri("/nope.css").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_web_tree_lists_directories_first() {
    let (_temp, app) = bundle();
    let (status, tree) = get(app, "/api/tree").await;
    assert_eq!(status, StatusCode::OK);

    let children = tree["children"].as_array().unwrap();
    let names: Vec<&str> = children.iter().map(|c| c["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["logs", "core.bin", "state.json"]);
    assert_eq!(children[0]["type"], "directory");
    assert_eq!(children[0]["children"][0]["path"], "logs/app.log");
}

#[tokio::test]
async fn test_web_file_payloads() {
    let (_temp, app) = bundle();

    let (status, small) = get(app.clone(), "/api/file?path=logs/app.log").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(small["type"], "text");
    assert!(small.get("total_lines").is_none());

    let (status, window) = get(app, "/api/file?path=logs/big.log&offset=2400&limit=1000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(window["total_lines"], 2500);
    assert_eq!(window["offset"], 2000);
    assert!(window["content"]
        .as_str()
        .unwrap()
        .starts_with("2024-01-01 10:00:00 INFO line 2001"));
}

#[tokio::test]
async fn test_web_view_log_with_level_filter() {
    let (_temp, app) = bundle();

    let (status, view) = get(app.clone(), "/api/view?path=logs/app.log").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["view"]["class"], "log");
    assert_eq!(view["view"]["search_enabled"], true);
    assert_eq!(view["view"]["line_count"], 2);
    assert_eq!(view["shown_lines"], 2);
    let html = view["html"].as_str().unwrap();
    assert!(html.starts_with("<div class=\"log-viewer\">"));
    assert!(html.contains("<div class=\"log-line log-error\" data-line=\"1\">"));
    assert!(html.contains("<span class=\"log-ip\">10.0.0.7</span>"));

    let (status, filtered) = get(app, "/api/view?path=logs/app.log&level=info").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(filtered["level"], "info");
    assert_eq!(filtered["view"]["line_count"], 2);
    assert_eq!(filtered["shown_lines"], 1);
    let html = filtered["html"].as_str().unwrap();
    assert!(html.contains("data-line=\"2\""));
    assert!(!html.contains("data-line=\"1\""));
}

#[tokio::test]
async fn test_web_view_paginated() {
    let (_temp, app) = bundle();
    let (status, view) = get(app, "/api/view?path=logs/big.log&offset=2999").await;
    assert_eq!(status, StatusCode::OK);

    let pagination = &view["view"]["pagination"];
    assert_eq!(pagination["is_paginated"], true);
    assert_eq!(pagination["current_offset"], 2000);
    assert_eq!(pagination["page_label"], "3 / 3");
    assert_eq!(pagination["range_label"], "2001 - 2500 of 2500");
    assert_eq!(pagination["can_next"], false);
    assert_eq!(view["view"]["search_enabled"], false);
    assert_eq!(view["view"]["first_line"], 2001);
}

#[tokio::test]
async fn test_web_view_json() {
    let (_temp, app) = bundle();
    let (status, view) = get(app, "/api/view?path=state.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["view"]["class"], "json");
    assert_eq!(view["view"]["line_count"], 4);
    let html = view["html"].as_str().unwrap();
    assert!(html.starts_with("<div class=\"json-content\">"));
    assert!(html.contains("json-key"));
}

#[tokio::test]
async fn test_web_search() {
    let (_temp, app) = bundle();

    let (status, result) = post_search(app.clone(), "logs/app.log", "DB").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["search"]["total_matches"], 1);
    assert_eq!(result["search"]["label"], "1 / 1");
    let html = result["html"].as_str().unwrap();
    assert!(html.starts_with("<pre class=\"text-content\">"));
    assert!(html.contains("<mark class=\"search-highlight current-highlight\" data-match=\"0\">db</mark>"));

    let (status, short) = post_search(app.clone(), "logs/app.log", "d").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(short["search"]["total_matches"], 0);
    assert!(!short["html"].as_str().unwrap().contains("<mark"));

    let (status, error) = post_search(app, "logs/big.log", "line").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(error["error"].as_str().unwrap().contains("paginated"));
}

#[tokio::test]
async fn test_web_error_statuses() {
    let (_temp, app) = bundle();

    let (status, body) = get(app.clone(), "/api/file?path=../etc/passwd").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("bundle root"));

    let (status, _) = get(app.clone(), "/api/file?path=logs").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(app.clone(), "/api/view?path=missing.log").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(app.clone(), "/api/view?path=core.bin").await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let (status, body) = get(app, "/api/view?path=logs/app.log&level=loud").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Unknown level filter"));
}

#[tokio::test]
async fn test_web_config() {
    let (_temp, app) = bundle();
    let (status, config) = get(app, "/api/config").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(config["page_size"], 1000);
    assert_eq!(config["pagination_threshold"], 2000);
    assert_eq!(config["debounce_ms"], 300);
    assert_eq!(config["search"]["min_query_len"], 2);
}
