//! HTTP email source
//!
//! Calls the email analysis backend, which pulls unread mail from Gmail,
//! scores it and summarises the frustrated messages.

use std::time::Duration;

use tracing::{debug, warn};

use super::{parse_response, EmailSource};
use crate::config::SourceConfig;
use crate::document::FetchedEmails;
use crate::error::{DashboardError, Result};

/// Path of the analysed-emails endpoint
pub const FETCH_PATH: &str = "/fetch_predicted_emails";

/// Backend HTTP client
pub struct HttpEmailSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpEmailSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DashboardError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, FETCH_PATH)
    }
}

#[async_trait::async_trait]
impl EmailSource for HttpEmailSource {
    async fn fetch(&self) -> Result<FetchedEmails> {
        let url = self.endpoint();
        debug!("HttpEmailSource: GET {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            warn!("HttpEmailSource: Request failed with status {}: {}", status, error_text);
            return Err(DashboardError::Fetch(format!("HTTP error! status: {}", status)));
        }

        let body = response.text().await?;
        let fetched = parse_response(&body)?;

        debug!("HttpEmailSource: Received {} emails", fetched.emails.len());
        Ok(fetched)
    }

    fn name(&self) -> &str {
        "http"
    }
}
