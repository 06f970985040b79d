//! An asynchronous client for a crawling service's REST API.
//!
//! Log in with a username and password to obtain a [`SessionClient`], then use
//! its helpers to manage organizations, crawl workflows, crawls and uploads.
//! Every helper issues exactly one HTTP request and hands back the parsed JSON.

pub mod api;
pub mod auth;
pub mod error;

pub use api::{ClientConfig, Organization, RequestBody, RequestOptions, SessionClient};
pub use auth::{login, Credential, LoginCredentials, LoginResponse};
pub use error::{ClientError, ClientResult};
