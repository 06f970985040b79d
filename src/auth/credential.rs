use reqwest::header::{HeaderValue, InvalidHeaderValue};
use std::fmt;

/// The authorization value sent alongside every request.
///
/// This is rendered once from the token type and access token we're given at
/// login, e.g. `Bearer eyJ[..]`, and never refreshed afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    header_value: String,
}

impl Credential {
    /// Creates a credential from the token type and access token returned by login.
    pub fn new(token_type: &str, access_token: &str) -> Self {
        Self {
            header_value: format!("{token_type} {access_token}"),
        }
    }

    /// Wraps an already-rendered authorization value, such as `Bearer xyz`.
    pub fn from_header_value(header_value: impl Into<String>) -> Self {
        Self {
            header_value: header_value.into(),
        }
    }

    /// The exact value sent within the `Authorization` header.
    pub fn header_value(&self) -> &str {
        &self.header_value
    }

    pub(crate) fn to_header(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        let mut value = HeaderValue::from_str(&self.header_value)?;
        value.set_sensitive(true);
        Ok(value)
    }
}

// Tokens end up in logs far too easily, so we only ever print the token type.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token_type = self.header_value.split(' ').next().unwrap_or_default();
        f.debug_struct("Credential")
            .field("token_type", &token_type)
            .finish_non_exhaustive()
    }
}
