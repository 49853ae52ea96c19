//! In-memory stand-in for the local device service.
//!
//! Speaks the same JSON-over-HTTP protocol as the real service but serves a
//! fixed set of devices and readings and keeps profiles in memory.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Device {
    pub index: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub temperature: f64,
    pub fan_rpm: u32,
    pub pump_rpm: u32,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct CurvePoint {
    pub temperature: f64,
    pub speed: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub points: Vec<CurvePoint>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyProfile {
    pub device_index: i64,
    pub profile_name: String,
}

#[derive(Deserialize)]
pub struct DeleteProfile {
    pub name: String,
}

#[derive(Deserialize)]
pub struct StatusQuery {
    pub device: Option<String>,
}

/// Everything the service knows: hardware, readings, and stored profiles.
#[derive(Clone, Debug, Default)]
pub struct Service {
    pub devices: Vec<Device>,
    pub readings: HashMap<u32, Status>,
    pub profiles: Vec<Profile>,
    /// Profile name last applied to each device index.
    pub applied: HashMap<i64, String>,
}

impl Service {
    /// Two devices with stable readings and no profiles.
    pub fn seeded() -> Self {
        let devices = vec![
            Device {
                index: 0,
                name: "NZXT Kraken X63".to_string(),
                kind: "NZXT Kraken X (X53, X63, X73)".to_string(),
            },
            Device {
                index: 1,
                name: "NZXT Smart Device V2".to_string(),
                kind: "NZXT Smart Device V2".to_string(),
            },
        ];
        let readings = HashMap::from([
            (
                0,
                Status {
                    temperature: 45.2,
                    fan_rpm: 1200,
                    pump_rpm: 2600,
                },
            ),
            (
                1,
                Status {
                    temperature: 38.5,
                    fan_rpm: 900,
                    pump_rpm: 0,
                },
            ),
        ]);
        Self {
            devices,
            readings,
            ..Self::default()
        }
    }

    /// Replace the profile with the same name in place, or append it.
    pub fn upsert_profile(&mut self, profile: Profile) {
        match self.profiles.iter_mut().find(|p| p.name == profile.name) {
            Some(existing) => *existing = profile,
            None => self.profiles.push(profile),
        }
    }

    /// Drop every profile called `name`. Unknown names are not an error.
    pub fn delete_profile(&mut self, name: &str) {
        self.profiles.retain(|p| p.name != name);
    }

    pub fn has_device(&self, index: i64) -> bool {
        self.devices.iter().any(|d| i64::from(d.index) == index)
    }

    pub fn reading(&self, index: i64) -> Option<Status> {
        u32::try_from(index)
            .ok()
            .and_then(|i| self.readings.get(&i))
            .copied()
    }
}

pub type Db = Arc<RwLock<Service>>;

type Failure = (StatusCode, Json<Value>);

fn failure(status: StatusCode, message: impl Into<String>) -> Failure {
    (status, Json(json!({ "error": message.into() })))
}

fn ok(status: &str) -> Json<Value> {
    Json(json!({ "status": status }))
}

/// Router over a fresh, seeded service.
pub fn app() -> Router {
    app_with(Arc::new(RwLock::new(Service::seeded())))
}

/// Router over caller-owned state, so tests can inspect it afterwards.
pub fn app_with(db: Db) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/devices", get(list_devices))
        .route("/status", get(get_status))
        .route("/profiles", get(list_profiles))
        .route("/profiles/save", post(save_profile))
        .route("/profiles/delete", post(delete_profile))
        .route("/profiles/apply", post(apply_profile))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn health() -> Json<Value> {
    ok("ok")
}

async fn list_devices(State(db): State<Db>) -> Json<Vec<Device>> {
    Json(db.read().await.devices.clone())
}

async fn get_status(
    State(db): State<Db>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Status>, Failure> {
    let raw = query
        .device
        .filter(|d| !d.is_empty())
        .ok_or_else(|| failure(StatusCode::BAD_REQUEST, "missing device index"))?;
    // Negative indices parse; they fail like any other unknown device.
    let index: i64 = raw
        .parse()
        .map_err(|_| failure(StatusCode::BAD_REQUEST, "invalid device index"))?;

    let service = db.read().await;
    service.reading(index).map(Json).ok_or_else(|| {
        warn!(index, "status requested for unknown device");
        failure(StatusCode::INTERNAL_SERVER_ERROR, format!("no device at index {index}"))
    })
}

async fn list_profiles(State(db): State<Db>) -> Json<Vec<Profile>> {
    Json(db.read().await.profiles.clone())
}

async fn save_profile(
    State(db): State<Db>,
    payload: Result<Json<Profile>, JsonRejection>,
) -> Result<Json<Value>, Failure> {
    let Json(profile) = payload.map_err(|_| failure(StatusCode::BAD_REQUEST, "invalid JSON"))?;
    info!(name = %profile.name, points = profile.points.len(), "saving profile");
    db.write().await.upsert_profile(profile);
    Ok(ok("saved"))
}

async fn delete_profile(
    State(db): State<Db>,
    payload: Result<Json<DeleteProfile>, JsonRejection>,
) -> Result<Json<Value>, Failure> {
    let Json(input) = payload.map_err(|_| failure(StatusCode::BAD_REQUEST, "invalid JSON"))?;
    info!(name = %input.name, "deleting profile");
    db.write().await.delete_profile(&input.name);
    Ok(ok("deleted"))
}

async fn apply_profile(
    State(db): State<Db>,
    payload: Result<Json<ApplyProfile>, JsonRejection>,
) -> Result<Json<Value>, Failure> {
    let Json(input) = payload.map_err(|_| failure(StatusCode::BAD_REQUEST, "invalid JSON"))?;

    let mut service = db.write().await;
    let profile = service
        .profiles
        .iter()
        .find(|p| p.name == input.profile_name)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "profile not found"))?;
    if profile.points.is_empty() {
        warn!(profile = %input.profile_name, "refusing to apply empty fan curve");
        return Err(failure(StatusCode::INTERNAL_SERVER_ERROR, "fan curve is empty"));
    }
    if !service.has_device(input.device_index) {
        warn!(index = input.device_index, "apply requested for unknown device");
        return Err(failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("no device at index {}", input.device_index),
        ));
    }

    info!(device = input.device_index, profile = %input.profile_name, "applying profile");
    service.applied.insert(input.device_index, input.profile_name);
    Ok(ok("applied"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, speed: i32) -> Profile {
        Profile {
            name: name.to_string(),
            points: vec![CurvePoint {
                temperature: 40.0,
                speed,
            }],
        }
    }

    #[test]
    fn device_serializes_kind_as_type() {
        let json = serde_json::to_value(&Service::seeded().devices[0]).unwrap();
        assert_eq!(json["index"], 0);
        assert_eq!(json["type"], "NZXT Kraken X (X53, X63, X73)");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn status_serializes_camel_case() {
        let json = serde_json::to_value(Service::seeded().readings[&0]).unwrap();
        assert_eq!(json["fanRpm"], 1200);
        assert_eq!(json["pumpRpm"], 2600);
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut service = Service::default();
        service.upsert_profile(profile("silent", 20));
        service.upsert_profile(profile("turbo", 100));
        service.upsert_profile(profile("silent", 30));

        let names: Vec<_> = service.profiles.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["silent", "turbo"]);
        assert_eq!(service.profiles[0].points[0].speed, 30);
    }

    #[test]
    fn delete_unknown_profile_is_noop() {
        let mut service = Service::default();
        service.upsert_profile(profile("silent", 20));
        service.delete_profile("missing");
        assert_eq!(service.profiles.len(), 1);
        service.delete_profile("silent");
        assert!(service.profiles.is_empty());
    }

    #[test]
    fn apply_profile_requires_camel_case_keys() {
        let input: ApplyProfile =
            serde_json::from_str(r#"{"deviceIndex":1,"profileName":"silent"}"#).unwrap();
        assert_eq!(input.device_index, 1);
        assert_eq!(input.profile_name, "silent");
        assert!(serde_json::from_str::<ApplyProfile>(r#"{"device_index":1}"#).is_err());
    }

    #[test]
    fn profile_name_defaults_to_empty() {
        let profile: Profile = serde_json::from_str(r#"{"points":[]}"#).unwrap();
        assert_eq!(profile.name, "");
        assert!(profile.points.is_empty());
    }

    #[test]
    fn curve_speed_is_not_clamped() {
        let point: CurvePoint = serde_json::from_str(r#"{"temperature":50,"speed":300}"#).unwrap();
        assert_eq!(point.speed, 300);
    }

    #[test]
    fn negative_index_has_no_reading() {
        let service = Service::seeded();
        assert!(service.reading(-1).is_none());
        assert!(!service.has_device(-1));
        assert!(service.reading(0).is_some());
    }
}
