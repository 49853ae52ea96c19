//! Client for the local liquid-cooling device service.
//!
//! # Overview
//! Lists devices, reads sensor status, and manages fan/pump profiles over the
//! service's JSON-over-HTTP API. The base address comes from `ClientConfig`
//! (default `http://127.0.0.1:8765`, overridable with `LIQUID_API_BASE`).
//!
//! # Design
//! - `DeviceClient` builds `HttpRequest`s and parses `HttpResponse`s without
//!   touching the network (host-does-IO pattern).
//! - `Transport` executes the round-trip; `UreqTransport` is the default.
//! - `LiquidApi` ties the two together behind named operations.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use api::LiquidApi;
pub use client::DeviceClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{ApplyProfile, CurvePoint, DeleteProfile, Device, Health, Profile, Status};
