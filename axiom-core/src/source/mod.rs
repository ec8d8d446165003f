//! Email sources
//!
//! The dashboard never talks to Gmail or the models directly; it asks an
//! [`EmailSource`] for the already analysed email set.

use crate::document::FetchedEmails;
use crate::error::{DashboardError, Result};

pub mod fixture;
pub mod http;
pub mod mock;

pub use fixture::FixtureSource;
pub use http::HttpEmailSource;
pub use mock::MockSource;

/// Email source trait
#[async_trait::async_trait]
pub trait EmailSource: Send + Sync {
    /// Fetch the analysed email set
    async fn fetch(&self) -> Result<FetchedEmails>;

    /// Source name for logs
    fn name(&self) -> &str;
}

/// Decode a backend response body
pub(crate) fn parse_response(body: &str) -> Result<FetchedEmails> {
    let mut fetched: FetchedEmails = serde_json::from_str(body)
        .map_err(|e| DashboardError::MalformedResponse(e.to_string()))?;
    crate::analysis::fill_combined_scores(&mut fetched.emails);
    Ok(fetched)
}
