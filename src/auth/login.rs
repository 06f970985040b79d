use crate::api::{normalize_base_url, ClientConfig, RequestOptions, SessionClient};
use crate::auth::Credential;
use crate::error::ClientResult;
use reqwest::{multipart::Form, Method};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

/// The path to the login endpoint, relative to the service's base URL.
pub const LOGIN_ENDPOINT: &str = "/api/auth/jwt/login";

/// The path to the logout endpoint, relative to the service's base URL.
pub const LOGOUT_ENDPOINT: &str = "/api/auth/jwt/logout";

/// The user's username and password, in a struct out of ease.
#[derive(Clone)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

/// The portion of the login response we care about.
///
/// The service returns a JWT alongside its type, which we later combine
/// into a single `Authorization` header value.
#[derive(Deserialize, Debug, Clone)]
pub struct LoginResponse {
    pub token_type: String,
    pub access_token: String,
}

impl From<LoginResponse> for Credential {
    fn from(response: LoginResponse) -> Self {
        Credential::new(&response.token_type, &response.access_token)
    }
}

/// Logs in with the given username and password, returning a client bound to this session.
///
/// The base URL has a single trailing slash removed. Credentials are submitted as
/// `multipart/form-data`. We make no attempt to check the response status: if the
/// service returns anything other than a token, parsing fails and that error is returned.
pub async fn login(base_url: &str, credentials: LoginCredentials) -> ClientResult<SessionClient> {
    let base_url = normalize_base_url(base_url);
    let http_client = reqwest::Client::new();

    let form = Form::new()
        .text("username", credentials.username)
        .text("password", credentials.password);

    let login_url = format!("{base_url}{LOGIN_ENDPOINT}");
    debug!(url = %login_url, "logging in");
    let response = http_client.post(&login_url).multipart(form).send().await?;

    let response_text = response.text().await?;
    let token: LoginResponse = serde_json::from_str(&response_text)?;
    info!(token_type = %token.token_type, "logged in");

    let config = ClientConfig::new(&base_url, token.into());
    Ok(SessionClient::with_http_client(http_client, config))
}

/// Ends the given session on the service's side.
///
/// Some deployments reply to logout with an empty body, which we treat as `null`.
pub async fn logout(client: SessionClient) -> ClientResult<Value> {
    let response = client
        .send(LOGOUT_ENDPOINT, RequestOptions::new(Method::POST))
        .await?;
    let response_text = response.text().await?;
    info!("logged out");

    if response_text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&response_text)?)
}
