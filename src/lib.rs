pub mod client;
pub mod config;
pub mod credential;
pub mod entry;
pub mod error;
pub mod fuel_log;
pub mod http;
pub mod hub;
pub mod lifecycle;
pub mod migration;
pub mod types;

pub use client::DrivvoClient;
pub use config::DrivvoConfig;
pub use credential::{Credentials, hash_password};
pub use entry::{CURRENT_VERSION, ConfigEntry};
pub use error::{Error, Result};
pub use fuel_log::{FuelLogSnapshot, sort_fuel_log};
pub use hub::{EntryData, Hub, TokioHub};
pub use lifecycle::{migrate_entry, setup_entry, unload_entry};
pub use migration::migrate_record;
pub use types::{AuthOutcome, DataKind, FuelLogEntry, SessionToken, VehicleData, VehicleId};
