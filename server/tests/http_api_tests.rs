use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use herodex_catalog::{CatalogService, InMemoryCache};
use herodex_common::{CharacterRecord, Error, Result};
use herodex_server::{build_router, ErrorBody};
use herodex_upstream::Fetcher;

/// Fetcher serving a fixed batch and a fixed set of single records.
struct FixedFetcher {
    batch: Vec<CharacterRecord>,
    records: HashMap<u64, CharacterRecord>,
}

#[async_trait]
impl Fetcher for FixedFetcher {
    async fn fetch_batch(
        &self,
        _modified_since: Option<DateTime<Utc>>,
    ) -> Result<Vec<CharacterRecord>> {
        Ok(self.batch.clone())
    }

    async fn fetch_one(&self, id: u64) -> Result<CharacterRecord> {
        self.records
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::NotFound("no results".to_string()))
    }
}

/// Fetcher whose upstream is down.
struct BrokenFetcher;

#[async_trait]
impl Fetcher for BrokenFetcher {
    async fn fetch_batch(
        &self,
        _modified_since: Option<DateTime<Utc>>,
    ) -> Result<Vec<CharacterRecord>> {
        Err(Error::BadGateway("upstream returned 503".to_string()))
    }

    async fn fetch_one(&self, _id: u64) -> Result<CharacterRecord> {
        Err(Error::BadGateway("upstream returned 503".to_string()))
    }
}

fn record(id: u64, secs: i64) -> CharacterRecord {
    CharacterRecord {
        id,
        name: format!("character-{id}"),
        description: "a character".to_string(),
        modified_at: Utc.timestamp_opt(1_500_000_000 + secs, 0).unwrap(),
    }
}

fn fixed_fetcher() -> FixedFetcher {
    let batch = vec![record(3, 30), record(1, 20), record(2, 10)];
    let records = batch.iter().map(|r| (r.id, r.clone())).collect();
    FixedFetcher { batch, records }
}

/// Spin up the HTTP server on an OS-assigned port, returning the base URL.
async fn spawn_test_server<F>(fetcher: F) -> String
where
    F: Fetcher + 'static,
{
    let service = Arc::new(CatalogService::new(
        Arc::new(fetcher),
        Arc::new(InMemoryCache::new()),
    ));
    let app = build_router(service);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://127.0.0.1:{}", port)
}

#[tokio::test]
async fn characters_endpoint_returns_sorted_ids() {
    let base = spawn_test_server(fixed_fetcher()).await;

    let resp = reqwest::get(format!("{base}/characters")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let ids: Vec<u64> = resp.json().await.unwrap();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn characters_endpoint_content_type_is_json() {
    let base = spawn_test_server(fixed_fetcher()).await;

    let resp = reqwest::get(format!("{base}/characters")).await.unwrap();
    let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.contains("application/json"));
}

#[tokio::test]
async fn character_endpoint_returns_public_view() {
    let base = spawn_test_server(fixed_fetcher()).await;

    let resp = reqwest::get(format!("{base}/characters/2")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["id"], 2);
    assert_eq!(body["name"], "character-2");
    assert!(body.get("modified_at").is_none());
}

#[tokio::test]
async fn unknown_character_maps_to_404() {
    let base = spawn_test_server(fixed_fetcher()).await;

    let resp = reqwest::get(format!("{base}/characters/999")).await.unwrap();
    assert_eq!(resp.status(), 404);

    let body: ErrorBody = resp.json().await.unwrap();
    assert!(body.error.contains("Not found"));
}

#[tokio::test]
async fn non_numeric_id_maps_to_400() {
    let base = spawn_test_server(fixed_fetcher()).await;

    let resp = reqwest::get(format!("{base}/characters/spider-man"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: ErrorBody = resp.json().await.unwrap();
    assert!(body.error.contains("invalid id"));
}

#[tokio::test]
async fn upstream_failure_maps_to_502() {
    let base = spawn_test_server(BrokenFetcher).await;

    let resp = reqwest::get(format!("{base}/characters")).await.unwrap();
    assert_eq!(resp.status(), 502);

    let resp = reqwest::get(format!("{base}/characters/1")).await.unwrap();
    assert_eq!(resp.status(), 502);
}
