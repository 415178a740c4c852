use super::{Result, SecretBackend, SecretError, SecretStoreConfig};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use secrecy::SecretString;
use std::sync::Arc;

/// Trait for secret providers - supports multiple implementations
#[async_trait]
pub trait SecretProvider: Send + Sync {
    /// Resolve a single secret by name
    async fn get_secret(&self, name: &str) -> Result<SecretString>;
}

/// AWS Secrets Manager backed provider
pub struct AwsSecretProvider {
    client: aws_sdk_secretsmanager::Client,
}

impl AwsSecretProvider {
    /// Create a provider bound to `region`, loading credentials from the
    /// default AWS provider chain.
    pub async fn new(region: &str) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        Self {
            client: aws_sdk_secretsmanager::Client::new(&sdk_config),
        }
    }
}

#[async_trait]
impl SecretProvider for AwsSecretProvider {
    async fn get_secret(&self, name: &str) -> Result<SecretString> {
        if name.is_empty() {
            return Err(SecretError::Config("secret name is not configured".into()));
        }

        let output = self
            .client
            .get_secret_value()
            .secret_id(name)
            .send()
            .await
            .map_err(|e| {
                let err = DisplayErrorContext(&e).to_string();
                tracing::warn!(secret = %name, error = %err, "Failed to get secret from Secrets Manager");
                SecretError::Aws(err)
            })?;

        output
            .secret_string()
            .map(|s| SecretString::from(s.to_string()))
            .ok_or(SecretError::UnexpectedFormat)
    }
}

/// Environment variable-based secret provider
pub struct EnvSecretProvider;

impl EnvSecretProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnvSecretProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SecretProvider for EnvSecretProvider {
    async fn get_secret(&self, name: &str) -> Result<SecretString> {
        if name.is_empty() {
            return Err(SecretError::Config("secret name is not configured".into()));
        }

        std::env::var(name).map(SecretString::from).map_err(|_| {
            tracing::debug!("Secret '{}' not found in environment variables", name);
            SecretError::NotFound(name.to_string())
        })
    }
}

/// Build the provider selected by `config`
pub async fn from_config(config: &SecretStoreConfig) -> Arc<dyn SecretProvider> {
    match config.backend {
        SecretBackend::Aws => {
            tracing::info!(region = %config.region, "Using AWS Secrets Manager secret provider");
            Arc::new(AwsSecretProvider::new(&config.region).await)
        }
        SecretBackend::Env => {
            tracing::info!("Using environment variable secret provider");
            Arc::new(EnvSecretProvider::new())
        }
    }
}
