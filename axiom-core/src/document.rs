//! Email document types

use serde::{Deserialize, Serialize};

/// One analysed email
///
/// Identified only by its position in the loaded sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub subject: String,
    pub from: String,
    pub date: String,
    pub body: String,
    /// Classification produced by the upstream pipeline
    pub is_frustrated: bool,
    /// Upstream message id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Custom model probability
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_custom: Option<f64>,
    /// Gemini probability
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_gemini: Option<f64>,
    /// Weighted combination of the two scores
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combined_score: Option<f64>,
}

impl Document {
    /// Create a document with no upstream scores
    pub fn new(
        subject: impl Into<String>,
        from: impl Into<String>,
        date: impl Into<String>,
        body: impl Into<String>,
        is_frustrated: bool,
    ) -> Self {
        Self {
            subject: subject.into(),
            from: from.into(),
            date: date.into(),
            body: body.into(),
            is_frustrated,
            id: None,
            score_custom: None,
            score_gemini: None,
            combined_score: None,
        }
    }

    /// Text covered by the search index
    pub fn searchable_text(&self) -> String {
        format!("{} {} {}", self.subject, self.from, self.body)
    }
}

/// Response of the email analysis backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedEmails {
    pub emails: Vec<Document>,
    pub frustration_summary: String,
}
