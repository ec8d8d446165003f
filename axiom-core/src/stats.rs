//! Aggregate statistics over the loaded email set

use serde::{Deserialize, Serialize};

use crate::document::Document;

/// Frustrated vs. not frustrated counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total: usize,
    pub frustrated_count: usize,
    pub not_frustrated_count: usize,
    /// Percentage of `total`, 0 when there are no emails
    pub frustrated_pct: f64,
    /// Percentage of `total`, 0 when there are no emails
    pub not_frustrated_pct: f64,
}

impl DashboardStats {
    pub fn compute(documents: &[Document]) -> Self {
        let total = documents.len();
        let frustrated_count = documents.iter().filter(|d| d.is_frustrated).count();
        let not_frustrated_count = total - frustrated_count;

        Self {
            total,
            frustrated_count,
            not_frustrated_count,
            frustrated_pct: percentage(frustrated_count, total),
            not_frustrated_pct: percentage(not_frustrated_count, total),
        }
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}
