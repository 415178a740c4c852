//! HTTP gateway in front of AudioCodes-style SBC REST APIs.
//!
//! Three operations are exposed: a liveness page, a device status proxy that
//! authenticates with a secret from the secret store, and tenant provisioning
//! that renders a CLI script template and uploads it to the device.

pub mod api;
pub mod auth;
pub mod config;
pub mod device;
pub mod metrics;
pub mod observability;
pub mod routing;
pub mod secret_store;
pub mod template;

pub use routing::{router, AppState};
