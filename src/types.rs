use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Opaque token issued by the login endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

/// Result of a login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Credentials accepted and a token was requested and returned
    Token(SessionToken),
    /// Credentials accepted; no token requested, or none in the body
    Accepted,
    /// Any non-success status or transport failure
    Rejected,
}

impl AuthOutcome {
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Self::Rejected)
    }

    pub fn into_token(self) -> Option<SessionToken> {
        match self {
            Self::Token(token) => Some(token),
            _ => None,
        }
    }
}

/// Body returned by the login endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

/// Vehicle id as stored in config entries.
///
/// The vendor sends ids as JSON numbers while the config flow stores strings,
/// so both deserialize into the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VehicleId(String);

impl VehicleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VehicleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl<'de> Deserialize<'de> for VehicleId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self(s),
            Raw::Number(n) => Self(n.to_string()),
        })
    }
}

/// Which per-vehicle resource to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    /// Refuelling history, `veiculo/{id}/abastecimento/web`
    FuelLog,
    /// Vehicle record, `veiculo/{id}`
    Base,
}

impl DataKind {
    /// API path for this resource on `vehicle`.
    pub fn path(self, vehicle: &VehicleId) -> String {
        match self {
            Self::FuelLog => format!("veiculo/{}/abastecimento/web", vehicle),
            Self::Base => format!("veiculo/{}", vehicle),
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FuelLog => write!(f, "fuel-log"),
            Self::Base => write!(f, "base"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDataKind(pub String);

impl fmt::Display for UnknownDataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown data kind: {}", self.0)
    }
}

impl std::error::Error for UnknownDataKind {}

impl FromStr for DataKind {
    type Err = UnknownDataKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fuel-log" | "abastecimento" => Ok(Self::FuelLog),
            "base" => Ok(Self::Base),
            other => Err(UnknownDataKind(other.to_string())),
        }
    }
}

/// One refuelling record.
///
/// Only the `data` (date) field is interpreted; everything else the vendor
/// sends is kept as-is in `fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelLogEntry {
    #[serde(rename = "data", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl FuelLogEntry {
    /// Numeric field, accepting both JSON numbers and numeric strings.
    pub fn number(&self, field: &str) -> Option<f64> {
        match self.fields.get(field)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields.get(field)?.as_str()
    }
}

/// Payload returned by [`DrivvoClient::get_vehicle_data`](crate::DrivvoClient::get_vehicle_data)
#[derive(Debug, Clone, PartialEq)]
pub enum VehicleData {
    /// Fuel log, most recent entry first
    FuelLog(Vec<FuelLogEntry>),
    Base(Value),
}

impl VehicleData {
    pub fn kind(&self) -> DataKind {
        match self {
            Self::FuelLog(_) => DataKind::FuelLog,
            Self::Base(_) => DataKind::Base,
        }
    }

    pub fn into_fuel_log(self) -> Option<Vec<FuelLogEntry>> {
        match self {
            Self::FuelLog(entries) => Some(entries),
            Self::Base(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_kind_from_str() {
        assert_eq!("fuel-log".parse::<DataKind>(), Ok(DataKind::FuelLog));
        assert_eq!("abastecimento".parse::<DataKind>(), Ok(DataKind::FuelLog));
        assert_eq!("base".parse::<DataKind>(), Ok(DataKind::Base));
        assert_eq!(
            "odometer".parse::<DataKind>(),
            Err(UnknownDataKind("odometer".to_string()))
        );
    }

    #[test]
    fn test_data_kind_paths() {
        let id = VehicleId::new("42");
        assert_eq!(DataKind::FuelLog.path(&id), "veiculo/42/abastecimento/web");
        assert_eq!(DataKind::Base.path(&id), "veiculo/42");
    }

    #[test]
    fn test_vehicle_id_accepts_numbers() {
        let ids: Vec<VehicleId> = serde_json::from_value(json!(["5", 17])).unwrap();
        assert_eq!(ids, vec![VehicleId::new("5"), VehicleId::new("17")]);
        assert_eq!(serde_json::to_value(&ids[1]).unwrap(), json!("17"));
    }

    #[test]
    fn test_fuel_log_entry_keeps_fields() {
        let raw = json!({"data": "2023-01-01 10:00:00", "preco": "5.49", "odometro": 1200});
        let entry: FuelLogEntry = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(entry.date.as_deref(), Some("2023-01-01 10:00:00"));
        assert_eq!(entry.number("preco"), Some(5.49));
        assert_eq!(entry.number("odometro"), Some(1200.0));
        assert_eq!(serde_json::to_value(&entry).unwrap(), raw);
    }

    #[test]
    fn test_session_token_debug_hidden() {
        let token = SessionToken::new("T1");
        assert_eq!(format!("{:?}", token), "SessionToken(..)");
        assert_eq!(AuthOutcome::Token(token).into_token().unwrap().as_str(), "T1");
        assert!(!AuthOutcome::Rejected.is_accepted());
        assert!(AuthOutcome::Accepted.is_accepted());
    }
}
