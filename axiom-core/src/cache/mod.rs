//! Snapshot cache
//!
//! Key-value persistence of the last fetched email set between sessions.
//! Two string keys are used: the serialized email array and the
//! frustration summary.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use tracing::debug;

use crate::document::Document;
use crate::error::Result;

/// Key holding the JSON email array
pub const EMAILS_KEY: &str = "emails";
/// Key holding the frustration summary text
pub const SUMMARY_KEY: &str = "frustrationSummary";

/// String key-value store
pub trait SnapshotStore: Send + Sync {
    /// Read a value
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Write several values at once. Either all of them land or none do.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<()>;

    /// Remove several values at once. Either all of them go or none do.
    fn remove_many(&self, keys: &[&str]) -> Result<()>;
}

/// Cached email set
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub emails: Vec<Document>,
    pub frustration_summary: String,
}

/// Read the snapshot. `Ok(None)` when either key is missing.
///
/// An emails value that does not parse is an error.
pub fn load_snapshot(store: &dyn SnapshotStore) -> Result<Option<Snapshot>> {
    let emails = store.get(EMAILS_KEY)?;
    let summary = store.get(SUMMARY_KEY)?;

    let (Some(emails), Some(frustration_summary)) = (emails, summary) else {
        debug!("Snapshot cache miss");
        return Ok(None);
    };

    let emails: Vec<Document> = serde_json::from_str(&emails)?;
    Ok(Some(Snapshot {
        emails,
        frustration_summary,
    }))
}

/// Write both snapshot keys
pub fn save_snapshot(store: &dyn SnapshotStore, snapshot: &Snapshot) -> Result<()> {
    let emails = serde_json::to_string(&snapshot.emails)?;
    store.set_many(&[
        (EMAILS_KEY, emails.as_str()),
        (SUMMARY_KEY, snapshot.frustration_summary.as_str()),
    ])?;
    debug!("Snapshot saved ({} emails)", snapshot.emails.len());
    Ok(())
}

/// Remove both snapshot keys
pub fn clear_snapshot(store: &dyn SnapshotStore) -> Result<()> {
    store.remove_many(&[EMAILS_KEY, SUMMARY_KEY])
}
