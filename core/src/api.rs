//! Named operations of the device service, executed end to end.
//!
//! `LiquidApi` pairs a `DeviceClient` with a `Transport`. `get` and `post`
//! are the only places a round-trip happens; every named operation is a
//! thin specialization that supplies a path and, for POSTs, a body.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::client::{DeviceClient, DEVICES_PATH, HEALTH_PATH, PROFILES_PATH, SAVE_PROFILE_PATH};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::transport::{Transport, UreqTransport};
use crate::types::{Device, Health, Status};

/// Client for the local device-monitoring service.
///
/// Holds no state besides its configuration and transport; every call is
/// independent and may run concurrently with any other.
#[derive(Debug, Clone)]
pub struct LiquidApi<T = UreqTransport> {
    client: DeviceClient,
    transport: T,
}

impl LiquidApi<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }

    /// Client for the address in `LIQUID_API_BASE`, or the default loopback
    /// address.
    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env())
    }
}

impl Default for LiquidApi<UreqTransport> {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl<T: Transport> LiquidApi<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            client: DeviceClient::new(config),
            transport,
        }
    }

    /// `GET {base}{path}`, decoded as `R`.
    pub fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let request = self.client.build_get(path);
        self.send(&request)
    }

    /// `POST {base}{path}` with `body` as JSON, decoded as `R`.
    pub fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self.client.build_post(path, body)?;
        self.send(&request)
    }

    pub fn health(&self) -> Result<Health, ApiError> {
        self.get(HEALTH_PATH)
    }

    pub fn list_devices(&self) -> Result<Vec<Device>, ApiError> {
        self.get(DEVICES_PATH)
    }

    pub fn get_status(&self, device_index: u32) -> Result<Status, ApiError> {
        let request = self.client.build_get_status(device_index);
        self.send(&request)
    }

    /// Profiles exactly as the service returns them.
    pub fn list_profiles(&self) -> Result<Vec<Value>, ApiError> {
        self.get(PROFILES_PATH)
    }

    /// Save `profile`, either a `types::Profile` or any JSON value.
    pub fn save_profile<P: Serialize + ?Sized>(&self, profile: &P) -> Result<Value, ApiError> {
        self.post(SAVE_PROFILE_PATH, profile)
    }

    pub fn apply_profile(&self, device_index: u32, profile_name: &str) -> Result<Value, ApiError> {
        let request = self.client.build_apply_profile(device_index, profile_name)?;
        self.send(&request)
    }

    pub fn delete_profile(&self, name: &str) -> Result<Value, ApiError> {
        let request = self.client.build_delete_profile(name)?;
        self.send(&request)
    }

    fn send<R: DeserializeOwned>(&self, request: &HttpRequest) -> Result<R, ApiError> {
        let response = self.transport.execute(request)?;
        self.client.parse(request, response)
    }
}
