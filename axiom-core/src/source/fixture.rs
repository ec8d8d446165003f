//! File-backed email source for offline use

use std::path::PathBuf;

use tracing::debug;

use super::{parse_response, EmailSource};
use crate::document::FetchedEmails;
use crate::error::{DashboardError, Result};

/// Reads a saved backend response from disk on every fetch
pub struct FixtureSource {
    path: PathBuf,
}

impl FixtureSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl EmailSource for FixtureSource {
    async fn fetch(&self) -> Result<FetchedEmails> {
        debug!("FixtureSource: reading {}", self.path.display());

        let body = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            DashboardError::Fetch(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        parse_response(&body)
    }

    fn name(&self) -> &str {
        "fixture"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_saved_response() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("emails.json");
        std::fs::write(
            &path,
            r#"{"emails": [{"subject": "Hi", "from": "a", "date": "d", "body": "b", "is_frustrated": false}],
                "frustration_summary": "No frustrated emails found."}"#,
        )
        .unwrap();

        let fetched = FixtureSource::new(&path).fetch().await.unwrap();
        assert_eq!(fetched.emails.len(), 1);
        assert_eq!(fetched.frustration_summary, "No frustrated emails found.");
    }

    #[tokio::test]
    async fn test_missing_file_is_fetch_failure() {
        let result = FixtureSource::new("/nonexistent/emails.json").fetch().await;
        assert!(matches!(result, Err(DashboardError::Fetch(_))));
    }

    #[tokio::test]
    async fn test_bad_shape_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("emails.json");
        std::fs::write(&path, r#"{"emails": "nope"}"#).unwrap();

        let result = FixtureSource::new(&path).fetch().await;
        assert!(matches!(result, Err(DashboardError::MalformedResponse(_))));
    }
}
