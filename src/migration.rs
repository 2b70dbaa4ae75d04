//! Config entry schema upgrades.
//!
//! Version 1 entries name a single vehicle; version 2 keeps a list. That is
//! the only transition, and version 2 is terminal.

use serde_json::Value;

use crate::entry::{CONF_EMAIL, CONF_ID_VEHICLE, CONF_PASSWORD, CONF_VEHICLES, ConfigEntry};
use crate::hub::EntryData;

/// Turn version 1 entry data into the version 2 shape.
///
/// Absent fields carry over as `null` rather than failing.
pub fn migrate_record(v1: &EntryData) -> EntryData {
    let field = |key: &str| v1.get(key).cloned().unwrap_or(Value::Null);

    let mut v2 = EntryData::new();
    v2.insert(CONF_EMAIL.to_string(), field(CONF_EMAIL));
    v2.insert(CONF_PASSWORD.to_string(), field(CONF_PASSWORD));
    v2.insert(
        CONF_VEHICLES.to_string(),
        Value::Array(vec![field(CONF_ID_VEHICLE)]),
    );
    v2
}

impl ConfigEntry {
    /// Upgrade this entry in place. Returns whether anything changed.
    pub fn migrate(&mut self) -> bool {
        if self.version != 1 {
            return false;
        }

        self.data = migrate_record(&self.data);
        self.version = 2;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(raw: Value) -> EntryData {
        raw.as_object().cloned().unwrap()
    }

    #[test]
    fn test_single_vehicle_wrapped_in_list() {
        let v2 = migrate_record(&data(json!({"email": "a@b.com", "password": "x", "id_vehicle": "5"})));
        assert_eq!(
            Value::Object(v2),
            json!({"email": "a@b.com", "password": "x", "vehicles": ["5"]})
        );
    }

    #[test]
    fn test_missing_fields_become_null() {
        let v2 = migrate_record(&data(json!({"email": "a@b.com"})));
        assert_eq!(
            Value::Object(v2),
            json!({"email": "a@b.com", "password": null, "vehicles": [null]})
        );
    }

    #[test]
    fn test_unrelated_keys_dropped() {
        let v2 = migrate_record(&data(json!({
            "email": "a@b.com", "password": "x", "id_vehicle": 7, "legacy": true
        })));
        assert!(!v2.contains_key("legacy"));
        assert!(!v2.contains_key(CONF_ID_VEHICLE));
    }

    #[test]
    fn test_entry_migrates_once() {
        let mut entry = ConfigEntry::new(
            "e1",
            1,
            data(json!({"email": "a@b.com", "password": "x", "id_vehicle": "5"})),
        );

        assert!(entry.migrate());
        assert_eq!(entry.version, 2);
        let migrated = entry.clone();

        assert!(!entry.migrate());
        assert_eq!(entry, migrated);
    }
}
