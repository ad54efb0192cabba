use crate::error::DashboardError;
use crate::fetch::client::HttpClient;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderValue};

/// An [`HttpClient`] wrapper that sends `Authorization: Bearer <token>`.
///
/// Published sheets need no credentials; this is for sheets shared only with
/// the account that owns the OAuth access token.
pub struct BearerToken<C> {
    inner: C,
    value: HeaderValue,
}

impl<C> BearerToken<C> {
    /// # Errors
    ///
    /// Returns [`DashboardError::Config`] if the token contains characters
    /// that are not valid in an HTTP header.
    pub fn new(inner: C, token: &str) -> Result<Self, DashboardError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| DashboardError::Config(format!("invalid access token: {e}")))?;
        value.set_sensitive(true);
        Ok(Self { inner, value })
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for BearerToken<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.headers_mut().insert(AUTHORIZATION, self.value.clone());
        self.inner.execute(req).await
    }
}
