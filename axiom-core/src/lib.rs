//! axiom-core: Email frustration dashboard
//!
//! Loads the analysed email set (each message flagged frustrated or not by
//! the analysis backend), indexes it in memory and answers filtered prefix
//! searches for the Axiom dashboard.
//!
//! # Example
//!
//! ```no_run
//! use axiom_core::cache::MemoryStore;
//! use axiom_core::source::HttpEmailSource;
//! use axiom_core::{DashboardController, FilterCategory};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = HttpEmailSource::new("http://localhost:5000", Duration::from_secs(60))?;
//!     let mut dashboard = DashboardController::new(Arc::new(source), Arc::new(MemoryStore::new()));
//!
//!     dashboard.mount().await;
//!     dashboard.set_filter(FilterCategory::Frustrated);
//!     dashboard.set_query("refund");
//!
//!     for email in dashboard.view().emails {
//!         println!("{}: {}", email.position, email.document.subject);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`search`]: Tokenizer, inverted index and category filter
//! - [`stats`]: Frustrated/not frustrated counts and percentages
//! - [`dashboard`]: Fetch-or-cache state controller
//! - [`cache`]: Snapshot persistence between sessions
//! - [`source`]: Email analysis backend clients
//! - [`analysis`]: Score combination rule
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod analysis;
pub mod cache;
pub mod config;
pub mod dashboard;
pub mod document;
pub mod error;
pub mod search;
pub mod source;
pub mod stats;

// Re-export commonly used types
pub use config::AxiomConfig;
pub use dashboard::{DashboardController, DashboardView, PendingRefresh, Phase};
pub use document::{Document, FetchedEmails};
pub use error::{DashboardError, Result};
pub use search::{tokenize, FilterCategory, InvertedIndex};
pub use stats::DashboardStats;
