//! Dashboard phases and the view handed to the presentation layer

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::document::Document;
use crate::search::FilterCategory;
use crate::stats::DashboardStats;

/// Lifecycle phase
///
/// `Idle -> Loading -> {Ready, Failed}`; `Failed -> Loading` on refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Loading => "loading",
            Phase::Ready => "ready",
            Phase::Failed(_) => "failed",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Phase::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Phase::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

/// A visible email with its position in the loaded set
#[derive(Debug, Clone, Serialize)]
pub struct VisibleEmail {
    pub position: usize,
    #[serde(flatten)]
    pub document: Document,
}

/// Everything the presentation layer renders
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub phase: &'static str,
    pub loading: bool,
    pub error: Option<String>,
    pub filter: FilterCategory,
    pub query: String,
    pub frustration_summary: String,
    pub stats: DashboardStats,
    pub emails: Vec<VisibleEmail>,
    pub last_refreshed_at: Option<DateTime<Utc>>,
}
