//! In-process HTTP tests: the router is bound to an ephemeral port and queried
//! with an async client.

use std::fs;
use std::sync::Arc;

use company_search::config::ServerConfig;
use company_search::dataset::Dataset;
use company_search::models::Record;
use company_search::server::{build_router, AppState};
use tempfile::TempDir;

fn company(name: &str) -> Record {
    Record::from_pairs([("Company Name", name), ("Sector", "Trade")])
}

fn sample_dataset() -> Dataset {
    Dataset::from_records(vec![
        company("Acme Corp"),
        company("Acme International"),
        company("Zenith"),
        Record::from_pairs([("City", "Acme Town")]),
    ])
}

fn api_only() -> ServerConfig {
    ServerConfig {
        serve_static: false,
        ..ServerConfig::default()
    }
}

async fn spawn_app(dataset: Dataset, max_results: usize, server: ServerConfig) -> String {
    let state = AppState::new(Arc::new(dataset), max_results);
    let app = build_router(state, &server);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn get_json(url: &str) -> (u16, serde_json::Value) {
    let resp = reqwest::get(url).await.unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

fn company_names(body: &serde_json::Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|r| r["Company Name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_search_matches_in_dataset_order() {
    let base = spawn_app(sample_dataset(), 20, api_only()).await;

    let (status, body) = get_json(&format!("{}/api/search?q=acme", base)).await;
    assert_eq!(status, 200);
    assert_eq!(company_names(&body), vec!["Acme Corp", "Acme International"]);
    assert_eq!(body[0]["Sector"], "Trade");
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let base = spawn_app(sample_dataset(), 20, api_only()).await;

    let (_, body) = get_json(&format!("{}/api/search?q=ZeNiTh", base)).await;
    assert_eq!(company_names(&body), vec!["Zenith"]);

    let (_, body) = get_json(&format!("{}/api/search?q=acme%20int", base)).await;
    assert_eq!(company_names(&body), vec!["Acme International"]);
}

#[tokio::test]
async fn test_search_no_match_is_empty_array() {
    let base = spawn_app(sample_dataset(), 20, api_only()).await;

    let (status, body) = get_json(&format!("{}/api/search?q=xyz", base)).await;
    assert_eq!(status, 200);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_missing_or_empty_query_returns_named_records() {
    let base = spawn_app(sample_dataset(), 20, api_only()).await;

    let (status, missing) = get_json(&format!("{}/api/search", base)).await;
    assert_eq!(status, 200);
    let (_, empty) = get_json(&format!("{}/api/search?q=", base)).await;

    assert_eq!(missing, empty);
    // The record without a Company Name is never returned.
    assert_eq!(
        company_names(&missing),
        vec!["Acme Corp", "Acme International", "Zenith"]
    );
}

#[tokio::test]
async fn test_result_cap() {
    let records = (0..50).map(|i| company(&format!("Firm {:02}", i))).collect();
    let base = spawn_app(Dataset::from_records(records), 20, api_only()).await;

    let (_, body) = get_json(&format!("{}/api/search?q=firm", base)).await;
    let names = company_names(&body);
    assert_eq!(names.len(), 20);
    assert_eq!(names[0], "Firm 00");
    assert_eq!(names[19], "Firm 19");
}

#[tokio::test]
async fn test_health_reports_record_count() {
    let base = spawn_app(sample_dataset(), 20, api_only()).await;

    let (status, body) = get_json(&format!("{}/health", base)).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["records"], 4);
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_unknown_route_without_static() {
    let base = spawn_app(sample_dataset(), 20, api_only()).await;

    let (status, body) = get_json(&format!("{}/index.html", base)).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"]["code"], "not_found");
    assert!(body["error"]["message"].as_str().unwrap().contains("/index.html"));
}

#[tokio::test]
async fn test_static_files_served() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("index.html"), "<h1>Company Search</h1>").unwrap();
    fs::write(tmp.path().join("app.js"), "console.log('hi');").unwrap();

    let server = ServerConfig {
        static_dir: tmp.path().to_path_buf(),
        ..ServerConfig::default()
    };
    let base = spawn_app(sample_dataset(), 20, server).await;

    let resp = reqwest::get(format!("{}/", base)).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "<h1>Company Search</h1>");

    let resp = reqwest::get(format!("{}/app.js", base)).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.text().await.unwrap().contains("console.log"));

    // The API still takes precedence over the static directory.
    let (status, body) = get_json(&format!("{}/api/search?q=zen", base)).await;
    assert_eq!(status, 200);
    assert_eq!(company_names(&body), vec!["Zenith"]);
}

#[tokio::test]
async fn test_cors_headers_present() {
    let base = spawn_app(sample_dataset(), 20, api_only()).await;

    let client = reqwest::Client::new();
    let resp = client
        .get(format!("{}/api/search?q=acme", base))
        .header("Origin", "http://example.com")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
