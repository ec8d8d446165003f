//! Scripted email source for testing

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use tracing::debug;

use super::EmailSource;
use crate::document::{Document, FetchedEmails};
use crate::error::{DashboardError, Result};

/// Returns queued responses in order, then fails
#[derive(Default)]
pub struct MockSource {
    responses: Mutex<VecDeque<Result<FetchedEmails>>>,
    calls: AtomicUsize,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response
    pub fn with_emails(self, emails: Vec<Document>, summary: impl Into<String>) -> Self {
        self.push(Ok(FetchedEmails {
            emails,
            frustration_summary: summary.into(),
        }));
        self
    }

    /// Queue a failure
    pub fn with_error(self, error: DashboardError) -> Self {
        self.push(Err(error));
        self
    }

    pub fn push(&self, response: Result<FetchedEmails>) {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(response);
        }
    }

    /// Number of fetches so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl EmailSource for MockSource {
    async fn fetch(&self) -> Result<FetchedEmails> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("MockSource: fetch #{}", call);

        let next = self
            .responses
            .lock()
            .map_err(|_| DashboardError::Fetch("mock source lock poisoned".to_string()))?
            .pop_front();

        next.unwrap_or_else(|| Err(DashboardError::Fetch("no scripted response".to_string())))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
