use super::client::missing_argument;
use super::{RequestOptions, SessionClient};
use crate::error::ClientResult;
use reqwest::Method;
use serde_json::Value;

impl SessionClient {
    /// Lists crawls within the given organization.
    pub async fn list_crawls(&self, org: &str) -> ClientResult<Value> {
        self.request(&format!("/api/{org}/crawls"), RequestOptions::default())
            .await
    }

    /// Fetches a crawl's replay information, including its resources.
    pub async fn get_crawl(&self, org: &str, crawl_id: &str) -> ClientResult<Option<Value>> {
        if crawl_id.is_empty() {
            return Ok(missing_argument("You must provide a crawl ID"));
        }

        let endpoint = format!("/api/{org}/crawls/{crawl_id}/replay.json");
        self.request(&endpoint, RequestOptions::default())
            .await
            .map(Some)
    }

    /// Asks a running crawl to stop gracefully, keeping what it has captured so far.
    pub async fn stop_crawl(&self, org: &str, crawl_id: &str) -> ClientResult<Option<Value>> {
        if crawl_id.is_empty() {
            return Ok(missing_argument("You must provide a crawl ID"));
        }

        let endpoint = format!("/api/{org}/crawls/{crawl_id}");
        self.request(&endpoint, RequestOptions::new(Method::POST))
            .await
            .map(Some)
    }
}
