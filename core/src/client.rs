//! Stateless HTTP request builder and response parser for the device service.
//!
//! # Design
//! `DeviceClient` holds only its `ClientConfig` and carries no mutable state
//! between calls. Every operation is a `build_*` method producing an
//! `HttpRequest`; every response goes through the one generic `parse`
//! method. The caller (usually `LiquidApi`) executes the round-trip in
//! between, so this module stays deterministic and free of I/O.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ApplyProfile, DeleteProfile};

pub const HEALTH_PATH: &str = "/health";
pub const DEVICES_PATH: &str = "/devices";
pub const STATUS_PATH: &str = "/status";
pub const PROFILES_PATH: &str = "/profiles";
pub const SAVE_PROFILE_PATH: &str = "/profiles/save";
pub const APPLY_PROFILE_PATH: &str = "/profiles/apply";
pub const DELETE_PROFILE_PATH: &str = "/profiles/delete";

/// Synchronous, stateless request builder for the device service API.
#[derive(Debug, Clone, Default)]
pub struct DeviceClient {
    config: ClientConfig,
}

impl DeviceClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// A bodiless GET for `path`, which must start with `/`.
    pub fn build_get(&self, path: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: path.to_string(),
            url: self.url(path),
            headers: Vec::new(),
            body: None,
        }
    }

    /// A POST for `path` carrying `body` serialized as JSON.
    pub fn build_post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: path.to_string(),
            url: self.url(path),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_health(&self) -> HttpRequest {
        self.build_get(HEALTH_PATH)
    }

    pub fn build_list_devices(&self) -> HttpRequest {
        self.build_get(DEVICES_PATH)
    }

    pub fn build_get_status(&self, device_index: u32) -> HttpRequest {
        self.build_get(&format!("{STATUS_PATH}?device={device_index}"))
    }

    pub fn build_list_profiles(&self) -> HttpRequest {
        self.build_get(PROFILES_PATH)
    }

    pub fn build_save_profile<P: Serialize + ?Sized>(&self, profile: &P) -> Result<HttpRequest, ApiError> {
        self.build_post(SAVE_PROFILE_PATH, profile)
    }

    pub fn build_apply_profile(&self, device_index: u32, profile_name: &str) -> Result<HttpRequest, ApiError> {
        let body = ApplyProfile {
            device_index,
            profile_name: profile_name.to_string(),
        };
        self.build_post(APPLY_PROFILE_PATH, &body)
    }

    pub fn build_delete_profile(&self, name: &str) -> Result<HttpRequest, ApiError> {
        let body = DeleteProfile { name: name.to_string() };
        self.build_post(DELETE_PROFILE_PATH, &body)
    }

    /// Check the status of `response` and decode its body as `R`.
    ///
    /// `request` is only used to describe the failure when the status is not
    /// in `[200, 299]`; the body is never inspected in that case.
    pub fn parse<R: DeserializeOwned>(&self, request: &HttpRequest, response: HttpResponse) -> Result<R, ApiError> {
        if !response.is_success() {
            return Err(ApiError::request(request.method, &request.path, response.status, &response.body));
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url())
    }
}
