use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::device::DeviceConfig;
use crate::secret_store::SecretStoreConfig;

pub const CONFIG_PATH_ENV: &str = "SBC_GATEWAY_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config/sbc-gateway.toml";

#[derive(Clone, Debug, Default, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub secret_store: SecretStoreConfig,
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub templates: TemplatesConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct TemplatesConfig {
    /// Tenant provisioning CLI script
    #[serde(default = "default_new_tenant_template")]
    pub new_tenant: PathBuf,
}

fn default_new_tenant_template() -> PathBuf {
    PathBuf::from("templates/new_tenant.txt")
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            new_tenant: default_new_tenant_template(),
        }
    }
}

impl GatewayConfig {
    /// Load from `$SBC_GATEWAY_CONFIG` (or the default path), then apply
    /// environment overrides.
    pub async fn load() -> anyhow::Result<Self> {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut cfg = Self::from_file(Path::new(&path)).await?;
        cfg.apply_env(|key| std::env::var(key).ok())?;
        Ok(cfg)
    }

    /// A missing file yields the defaults; a malformed one is an error.
    pub async fn from_file(path: &Path) -> anyhow::Result<Self> {
        match tokio::fs::read_to_string(path).await {
            Ok(text) => Ok(toml::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(anyhow::anyhow!("failed to read {}: {}", path.display(), e)),
        }
    }

    fn apply_env<F>(&mut self, var: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = var("PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid PORT '{}': {}", port, e))?;
        }
        if let Some(name) = var("AWS_SECRET_NAME") {
            self.secret_store.secret_name = name;
        }
        if let Some(region) = var("AWS_SECRET_REGION").or_else(|| var("AWS_SECRETE_REGION")) {
            self.secret_store.region = region;
        }
        if let Some(path) = var("SBC_TEMPLATE_PATH") {
            self.templates.new_tenant = PathBuf::from(path);
        }
        if let Some(ms) = var("SBC_DEVICE_TIMEOUT_MS") {
            self.device.timeout_ms = ms
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid SBC_DEVICE_TIMEOUT_MS '{}': {}", ms, e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DEFAULT_TIMEOUT_MS;
    use crate::secret_store::SecretBackend;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let cfg = GatewayConfig::default();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.device.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(cfg.device.port, None);
        assert_eq!(cfg.secret_store.backend, SecretBackend::Aws);
        assert_eq!(
            cfg.templates.new_tenant,
            PathBuf::from("templates/new_tenant.txt")
        );
    }

    #[test]
    fn parses_full_file() {
        let cfg: GatewayConfig = toml::from_str(
            r#"
            [server]
            port = 9000

            [secret_store]
            backend = "env"
            secret_name = "SBC_AUTH"
            region = "us-east-1"

            [device]
            timeout_ms = 2000
            port = 8443

            [templates]
            new_tenant = "/etc/sbc/tenant.txt"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.secret_store.backend, SecretBackend::Env);
        assert_eq!(cfg.secret_store.region, "us-east-1");
        assert_eq!(cfg.device.timeout_ms, 2000);
        assert_eq!(cfg.device.port, Some(8443));
        assert_eq!(cfg.templates.new_tenant, PathBuf::from("/etc/sbc/tenant.txt"));
    }

    #[test]
    fn env_overrides_file_values() {
        let mut cfg = GatewayConfig::default();
        cfg.apply_env(env(&[
            ("PORT", "3000"),
            ("AWS_SECRET_NAME", "prod/sbc"),
            ("AWS_SECRET_REGION", "ap-southeast-2"),
            ("SBC_TEMPLATE_PATH", "/tmp/t.txt"),
            ("SBC_DEVICE_TIMEOUT_MS", "1500"),
        ]))
        .unwrap();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.secret_store.secret_name, "prod/sbc");
        assert_eq!(cfg.secret_store.region, "ap-southeast-2");
        assert_eq!(cfg.templates.new_tenant, PathBuf::from("/tmp/t.txt"));
        assert_eq!(cfg.device.timeout_ms, 1500);
    }

    #[test]
    fn legacy_region_variable_is_honoured() {
        let mut cfg = GatewayConfig::default();
        cfg.apply_env(env(&[("AWS_SECRETE_REGION", "eu-central-1")]))
            .unwrap();
        assert_eq!(cfg.secret_store.region, "eu-central-1");
    }

    #[test]
    fn invalid_port_is_an_error() {
        let mut cfg = GatewayConfig::default();
        assert!(cfg.apply_env(env(&[("PORT", "http")])).is_err());
    }

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = GatewayConfig::from_file(&dir.path().join("absent.toml"))
            .await
            .unwrap();
        assert_eq!(cfg.server.port, 8080);
    }
}
