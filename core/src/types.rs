//! Wire shapes for the device service.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any drift between the two crates. The client never
//! validates their contents beyond deserialization.

use serde::{Deserialize, Serialize};

/// A controllable unit (fan hub, pump, AIO cooler) exposed by the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Device {
    pub index: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A point-in-time sensor reading for one device.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub temperature: f64,
    pub fan_rpm: u32,
    pub pump_rpm: u32,
}

/// One point of a fan curve. `speed` is a duty percentage, normally 0-100;
/// the service does not enforce the range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CurvePoint {
    pub temperature: f64,
    pub speed: i32,
}

/// A named fan curve as stored by the service.
///
/// Profiles are otherwise passed around as opaque `serde_json::Value`s; this
/// type is a convenience for callers that want to build one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub points: Vec<CurvePoint>,
}

/// Body of `POST /profiles/apply`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApplyProfile {
    pub device_index: u32,
    pub profile_name: String,
}

/// Body of `POST /profiles/delete`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteProfile {
    pub name: String,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Health {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn device_type_field_uses_wire_name() {
        let device: Device =
            serde_json::from_str(r#"{"index":0,"name":"Kraken X63","type":"NZXT Kraken X (X53, X63, X73)"}"#)
                .unwrap();
        assert_eq!(device.kind, "NZXT Kraken X (X53, X63, X73)");
        let back = serde_json::to_value(&device).unwrap();
        assert_eq!(back["type"], "NZXT Kraken X (X53, X63, X73)");
        assert!(back.get("kind").is_none());
    }

    #[test]
    fn status_uses_camel_case() {
        let status: Status =
            serde_json::from_str(r#"{"temperature":45.2,"fanRpm":1200,"pumpRpm":2600}"#).unwrap();
        assert_eq!(
            status,
            Status {
                temperature: 45.2,
                fan_rpm: 1200,
                pump_rpm: 2600
            }
        );
    }

    #[test]
    fn apply_profile_serializes_exact_keys() {
        let body = ApplyProfile {
            device_index: 1,
            profile_name: "silent".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"deviceIndex": 1, "profileName": "silent"})
        );
    }

    #[test]
    fn profile_points_default_to_empty() {
        let profile: Profile = serde_json::from_str(r#"{"name":"bare"}"#).unwrap();
        assert!(profile.points.is_empty());
    }
}
