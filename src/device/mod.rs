//! Client for the SBC REST API.

mod client;
mod error;

pub use client::{DeviceClient, DeviceConfig, CLI_SCRIPT_FILE_NAME, DEFAULT_TIMEOUT_MS};
pub use error::DeviceError;
