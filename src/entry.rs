//! Persisted config entries.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::credential::Credentials;
use crate::error::{Error, Result};
use crate::hub::EntryData;
use crate::types::VehicleId;

pub const CONF_EMAIL: &str = "email";
pub const CONF_PASSWORD: &str = "password";
/// Single vehicle id, version 1 entries only
pub const CONF_ID_VEHICLE: &str = "id_vehicle";
/// List of vehicle ids, version 2 onwards
pub const CONF_VEHICLES: &str = "vehicles";

/// Schema version new entries are written with.
pub const CURRENT_VERSION: u32 = 2;

/// One configured integration instance, as the host persists it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub entry_id: String,
    pub version: u32,
    pub data: EntryData,
}

impl ConfigEntry {
    pub fn new(entry_id: impl Into<String>, version: u32, data: EntryData) -> Self {
        Self {
            entry_id: entry_id.into(),
            version,
            data,
        }
    }

    /// Build a current-version entry for `vehicles`.
    pub fn from_parts(
        entry_id: impl Into<String>,
        email: &str,
        password: &str,
        vehicles: &[VehicleId],
    ) -> Self {
        let mut data = EntryData::new();
        data.insert(CONF_EMAIL.to_string(), Value::from(email));
        data.insert(CONF_PASSWORD.to_string(), Value::from(password));
        data.insert(
            CONF_VEHICLES.to_string(),
            Value::Array(vehicles.iter().map(|v| Value::from(v.as_str())).collect()),
        );
        Self::new(entry_id, CURRENT_VERSION, data)
    }

    /// Account credentials stored in the entry.
    pub fn credentials(&self) -> Result<Credentials> {
        Ok(Credentials::new(
            self.string_field(CONF_EMAIL)?,
            self.string_field(CONF_PASSWORD)?,
        ))
    }

    /// Configured vehicles. Null or malformed ids are skipped.
    pub fn vehicles(&self) -> Vec<VehicleId> {
        let ids: Vec<Value> = match self.version {
            1 => self.data.get(CONF_ID_VEHICLE).cloned().into_iter().collect(),
            _ => match self.data.get(CONF_VEHICLES) {
                Some(Value::Array(ids)) => ids.clone(),
                _ => Vec::new(),
            },
        };

        ids.into_iter()
            .filter_map(|id| serde_json::from_value(id).ok())
            .collect()
    }

    fn string_field(&self, key: &str) -> Result<&str> {
        self.data
            .get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| Error::InvalidEntry(format!("missing or non-string '{}'", key)))
    }
}
