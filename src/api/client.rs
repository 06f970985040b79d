use crate::auth::{self, Credential, LoginCredentials};
use crate::error::ClientResult;
use reqwest::{header, Body, Method, Response};
use serde_json::Value;
use tracing::{debug, warn};

/// Removes a single trailing slash from the given base URL, if present.
pub(crate) fn normalize_base_url(base_url: &str) -> String {
    base_url.strip_suffix('/').unwrap_or(base_url).to_string()
}

/// Where to send requests, and how to authorize them.
/// Both are fixed for the lifetime of a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    credential: Credential,
}

impl ClientConfig {
    pub fn new(base_url: &str, credential: Credential) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            credential,
        }
    }

    /// The base URL, without any trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }
}

/// The body of a request.
#[derive(Debug)]
pub enum RequestBody {
    /// A JSON payload, serialized as-is.
    Json(Value),
    /// A body passed through to the service without being buffered in full.
    Stream(Body),
}

/// How to perform a request: its method and optional body.
///
/// Defaults to a `GET` without a body.
#[derive(Debug, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<RequestBody>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self { method, body: None }
    }

    /// Attaches a JSON payload.
    pub fn json(mut self, value: Value) -> Self {
        self.body = Some(RequestBody::Json(value));
        self
    }

    /// Attaches a streaming body, such as a file being uploaded.
    pub fn stream(mut self, body: impl Into<Body>) -> Self {
        self.body = Some(RequestBody::Stream(body.into()));
        self
    }
}

/// An authenticated session against the crawling service.
///
/// Cloning is cheap, and clones share the same underlying connection pool.
#[derive(Debug, Clone)]
pub struct SessionClient {
    http_client: reqwest::Client,
    config: ClientConfig,
}

impl SessionClient {
    /// Creates a client around an existing authorization value.
    pub fn new(base_url: &str, credential: Credential) -> Self {
        Self::with_http_client(reqwest::Client::new(), ClientConfig::new(base_url, credential))
    }

    pub(crate) fn with_http_client(http_client: reqwest::Client, config: ClientConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Logs in with a username and password. See [`auth::login`].
    pub async fn login(base_url: &str, username: &str, password: &str) -> ClientResult<Self> {
        let credentials = LoginCredentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        auth::login(base_url, credentials).await
    }

    /// Ends this session. See [`auth::logout`].
    pub async fn logout(self) -> ClientResult<Value> {
        auth::logout(self).await
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    pub fn credential(&self) -> &Credential {
        self.config.credential()
    }

    /// Performs an authenticated request against `endpoint`, returning its parsed JSON body.
    ///
    /// The endpoint must begin with a slash and carry its own query string.
    /// The response is parsed no matter its status code: error bodies are returned
    /// just like any other. Only a body that isn't JSON results in an error.
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> ClientResult<Value> {
        let response = self.send(endpoint, options).await?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, endpoint, "service responded with an error status");
        }

        let response_text = response.text().await?;
        Ok(serde_json::from_str(&response_text)?)
    }

    /// Sends a request with our credential attached, without reading its response.
    pub(crate) async fn send(&self, endpoint: &str, options: RequestOptions) -> ClientResult<Response> {
        let url = format!("{}{}", self.config.base_url, endpoint);
        debug!(method = %options.method, %url, "sending request");

        let mut request = self
            .http_client
            .request(options.method, &url)
            .header(header::AUTHORIZATION, self.config.credential.to_header()?)
            .header(header::CONTENT_TYPE, "application/json");

        request = match options.body {
            Some(RequestBody::Json(value)) => request.body(serde_json::to_vec(&value)?),
            Some(RequestBody::Stream(body)) => request.body(body),
            None => request,
        };

        Ok(request.send().await?)
    }
}

/// Emits a diagnostic for a missing argument. Operations return nothing afterwards.
pub(crate) fn missing_argument(message: &str) -> Option<Value> {
    warn!("{message}");
    None
}

/// Treats an absent or `null` payload as missing.
pub(crate) fn present(payload: Option<Value>) -> Option<Value> {
    payload.filter(|payload| !payload.is_null())
}
