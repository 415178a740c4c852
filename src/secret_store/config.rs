use serde::{Deserialize, Serialize};

/// Which backend resolves the device authorization secret
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretBackend {
    /// AWS Secrets Manager
    #[default]
    Aws,
    /// Environment variable named after the secret
    Env,
}

/// Configuration for secret store integration
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SecretStoreConfig {
    #[serde(default)]
    pub backend: SecretBackend,

    /// Name (SecretId) of the secret holding the SBC `Authorization` value
    #[serde(default)]
    pub secret_name: String,

    /// AWS region the secret lives in
    #[serde(default = "default_region")]
    pub region: String,
}

fn default_region() -> String {
    "eu-west-2".to_string()
}

impl Default for SecretStoreConfig {
    fn default() -> Self {
        Self {
            backend: SecretBackend::default(),
            secret_name: String::new(),
            region: default_region(),
        }
    }
}
