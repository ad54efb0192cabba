mod client;
mod basic;
pub mod auth;

pub use client::HttpClient;
pub use basic::BasicClient;

use crate::error::DashboardError;

/// Issues a GET for `url` and returns the body as text.
///
/// # Errors
///
/// Returns [`DashboardError::Fetch`] on connection failure, a non-success
/// status, or an unreadable body. `what` names the resource in the message.
pub async fn fetch_text<C: HttpClient + ?Sized>(
    client: &C,
    url: &str,
    what: &str,
) -> Result<String, DashboardError> {
    let parsed = url
        .parse::<reqwest::Url>()
        .map_err(|e| DashboardError::Fetch(format!("Invalid URL for {what}: {e}")))?;
    let req = reqwest::Request::new(reqwest::Method::GET, parsed);

    let resp = client
        .execute(req)
        .await
        .map_err(|e| DashboardError::Fetch(format!("Failed to fetch {what}: {e}")))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(DashboardError::Fetch(format!(
            "Failed to fetch {what}: {}",
            status.as_u16()
        )));
    }

    resp.text()
        .await
        .map_err(|e| DashboardError::Fetch(format!("Failed to read {what}: {e}")))
}
