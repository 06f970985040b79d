use super::{RequestOptions, SessionClient};
use crate::error::ClientResult;
use reqwest::{Body, Method};
use serde_json::Value;
use std::path::Path;
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use tracing::debug;
use url::form_urlencoded;

fn upload_endpoint(org: &str, name: &str) -> String {
    let encoded_name: String = form_urlencoded::byte_serialize(name.as_bytes()).collect();
    format!("/api/orgs/{org}/uploads/stream?name={encoded_name}")
}

impl SessionClient {
    /// Uploads the given body under `name`.
    ///
    /// The body is passed through as-is. Streaming bodies are never read into memory in full.
    pub async fn upload(&self, org: &str, name: &str, body: impl Into<Body>) -> ClientResult<Value> {
        let options = RequestOptions::new(Method::PUT).stream(body);
        self.request(&upload_endpoint(org, name), options).await
    }

    /// Streams the file at `path` to the service.
    ///
    /// If no name is given, we'll use the file's own name.
    pub async fn upload_file(&self, org: &str, path: &Path, name: Option<&str>) -> ClientResult<Value> {
        let file = File::open(path).await?;
        let name = match name {
            Some(name) => name.to_string(),
            None => path
                .file_name()
                .map(|file_name| file_name.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };
        debug!(path = %path.display(), %name, "uploading file");

        let body = Body::wrap_stream(ReaderStream::new(file));
        self.upload(org, &name, body).await
    }
}
