mod client;
mod crawls;
mod orgs;
mod uploads;
mod workflows;

pub(crate) use client::normalize_base_url;
pub use client::{ClientConfig, RequestBody, RequestOptions, SessionClient};
pub use orgs::Organization;
