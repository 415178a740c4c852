//! Secret Store Integration Module
//!
//! Resolves the SBC REST API `Authorization` value from an external store.
//! Two implementations are provided:
//!
//! - `AwsSecretProvider`: AWS Secrets Manager (`GetSecretValue`)
//! - `EnvSecretProvider`: environment variables, for lab devices and local runs
//!
//! # Example
//!
//! ```no_run
//! use sbc_gateway::secret_store::{AwsSecretProvider, SecretProvider};
//! use secrecy::ExposeSecret;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = AwsSecretProvider::new("eu-west-2").await;
//!     let auth = provider.get_secret("sbc/rest-api-authorization").await?;
//!     println!("{} bytes", auth.expose_secret().len());
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod provider;

pub use config::{SecretBackend, SecretStoreConfig};
pub use error::{Result, SecretError};
pub use provider::{from_config, AwsSecretProvider, EnvSecretProvider, SecretProvider};
