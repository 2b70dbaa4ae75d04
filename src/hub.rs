//! Capabilities the host hub lends to the integration.
//!
//! The integration never reaches for global state: everything it needs from
//! the host is a way to run blocking calls off the async scheduler and a place
//! to keep per-entry config data while the entry is loaded.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use serde_json::{Map, Value};

use crate::error::Result;

/// Config data the host keeps for one loaded entry.
pub type EntryData = Map<String, Value>;

pub trait Hub: Send + Sync {
    /// Run `job` on a thread where blocking is allowed and await its result.
    fn run_blocking<F, T>(&self, job: F) -> impl Future<Output = Result<T>> + Send
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static;

    /// Remember `data` for `entry_id`, replacing whatever was there.
    fn store_entry_data(&self, entry_id: &str, data: EntryData);

    fn entry_data(&self, entry_id: &str) -> Option<EntryData>;

    /// Forget the data for `entry_id`, returning it if present.
    fn remove_entry_data(&self, entry_id: &str) -> Option<EntryData>;
}

/// [`Hub`] backed by the tokio blocking pool and an in-memory entry map.
#[derive(Debug, Default)]
pub struct TokioHub {
    entries: RwLock<HashMap<String, EntryData>>,
}

impl TokioHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of all entries currently set up, in no particular order.
    pub fn entry_ids(&self) -> Vec<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

impl Hub for TokioHub {
    async fn run_blocking<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        Ok(tokio::task::spawn_blocking(job).await?)
    }

    fn store_entry_data(&self, entry_id: &str, data: EntryData) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(entry_id.to_string(), data);
    }

    fn entry_data(&self, entry_id: &str) -> Option<EntryData> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(entry_id)
            .cloned()
    }

    fn remove_entry_data(&self, entry_id: &str) -> Option<EntryData> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(entry_id)
    }
}
