//! Host plugin hooks: setup, unload and migrate.

use crate::client::DrivvoClient;
use crate::entry::ConfigEntry;
use crate::error::{Error, Result};
use crate::hub::Hub;

/// Set up `entry`: check its credentials and register its data with the hub.
///
/// Rejected credentials fail setup with [`Error::AuthFailed`] so the host can
/// ask the user to re-authenticate.
pub async fn setup_entry<H: Hub>(client: &DrivvoClient<H>, entry: &ConfigEntry) -> Result<bool> {
    let credentials = entry.credentials()?;

    if !client.authenticate(&credentials, false).await.is_accepted() {
        return Err(Error::AuthFailed("Invalid authentication".to_string()));
    }

    client.hub().store_entry_data(&entry.entry_id, entry.data.clone());
    tracing::info!(
        "Set up entry {} with {} vehicle(s)",
        entry.entry_id,
        entry.vehicles().len()
    );
    Ok(true)
}

/// Unload `entry`, dropping the data registered at setup.
///
/// Returns `false` when the entry was never set up.
pub fn unload_entry<H: Hub>(hub: &H, entry: &ConfigEntry) -> bool {
    hub.remove_entry_data(&entry.entry_id).is_some()
}

/// Bring `entry` to the current schema version. Always succeeds.
pub fn migrate_entry(entry: &mut ConfigEntry) -> bool {
    tracing::debug!("Migrating from version {}", entry.version);
    entry.migrate();
    tracing::info!("Migration to version {} successful", entry.version);
    true
}
