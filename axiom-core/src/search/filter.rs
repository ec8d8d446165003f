//! Category filter applied on top of search results

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::document::Document;

/// Which classification to show
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterCategory {
    #[default]
    All,
    Frustrated,
    NotFrustrated,
}

impl FilterCategory {
    /// Whether `document` passes this filter
    pub fn matches(self, document: &Document) -> bool {
        match self {
            FilterCategory::All => true,
            FilterCategory::Frustrated => document.is_frustrated,
            FilterCategory::NotFrustrated => !document.is_frustrated,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FilterCategory::All => "all",
            FilterCategory::Frustrated => "frustrated",
            FilterCategory::NotFrustrated => "not-frustrated",
        }
    }
}

impl fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(FilterCategory::All),
            "frustrated" => Ok(FilterCategory::Frustrated),
            "not-frustrated" | "not_frustrated" => Ok(FilterCategory::NotFrustrated),
            other => Err(format!("Unknown filter category: {}", other)),
        }
    }
}
