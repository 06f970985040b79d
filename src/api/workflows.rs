//! Crawl workflows, known to the service as "crawlconfigs".

use super::client::{missing_argument, present};
use super::{RequestOptions, SessionClient};
use crate::error::ClientResult;
use reqwest::Method;
use serde_json::Value;

fn workflows_endpoint(org: &str) -> String {
    format!("/api/{org}/crawlconfigs")
}

fn workflow_endpoint(org: &str, workflow_id: &str) -> String {
    format!("/api/{org}/crawlconfigs/{workflow_id}")
}

impl SessionClient {
    pub async fn list_workflows(&self, org: &str) -> ClientResult<Value> {
        self.request(&workflows_endpoint(org), RequestOptions::default())
            .await
    }

    /// Fetches a single workflow.
    /// Returns nothing, without making a request, if no workflow ID is given.
    pub async fn get_workflow(&self, org: &str, workflow_id: &str) -> ClientResult<Option<Value>> {
        if workflow_id.is_empty() {
            return Ok(missing_argument("You must provide a crawl workflow ID"));
        }

        self.request(&workflow_endpoint(org, workflow_id), RequestOptions::default())
            .await
            .map(Some)
    }

    /// Creates a workflow from the given configuration.
    /// Returns nothing, without making a request, if no configuration is given.
    pub async fn create_workflow(&self, org: &str, config: Option<Value>) -> ClientResult<Option<Value>> {
        let Some(config) = present(config) else {
            return Ok(missing_argument("You must provide a crawl workflow configuration"));
        };

        // The trailing slash is expected by the service here.
        let endpoint = format!("{}/", workflows_endpoint(org));
        self.request(&endpoint, RequestOptions::new(Method::POST).json(config))
            .await
            .map(Some)
    }

    /// Updates an existing workflow with the given (partial) configuration.
    pub async fn update_workflow(
        &self,
        org: &str,
        workflow_id: &str,
        config: Option<Value>,
    ) -> ClientResult<Option<Value>> {
        let config = match present(config) {
            Some(config) if !workflow_id.is_empty() => config,
            _ => {
                return Ok(missing_argument(
                    "You must provide a crawl workflow ID and a crawl workflow configuration to update",
                ))
            }
        };

        self.request(
            &workflow_endpoint(org, workflow_id),
            RequestOptions::new(Method::PATCH).json(config),
        )
        .await
        .map(Some)
    }

    pub async fn delete_workflow(&self, org: &str, workflow_id: &str) -> ClientResult<Option<Value>> {
        if workflow_id.is_empty() {
            return Ok(missing_argument("You must provide a crawl workflow ID"));
        }

        self.request(
            &workflow_endpoint(org, workflow_id),
            RequestOptions::new(Method::DELETE),
        )
        .await
        .map(Some)
    }

    /// Starts a new crawl of the given workflow.
    pub async fn run_workflow(&self, org: &str, workflow_id: &str) -> ClientResult<Option<Value>> {
        if workflow_id.is_empty() {
            return Ok(missing_argument("You must provide a crawl workflow ID"));
        }

        let endpoint = format!("{}/run", workflow_endpoint(org, workflow_id));
        self.request(&endpoint, RequestOptions::new(Method::POST))
            .await
            .map(Some)
    }
}
