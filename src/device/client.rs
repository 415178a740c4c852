use std::time::{Duration, Instant};

use reqwest::header::{self, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::DeviceError;
use crate::metrics::DEVICE_REQUEST_DURATION;

pub const DEFAULT_TIMEOUT_MS: u64 = 7000;
pub const CLI_SCRIPT_FILE_NAME: &str = "cli.txt";

const STATUS_PATH: &str = "/api/v1/status";
const INCREMENTAL_CLI_SCRIPT_PATH: &str = "/api/v1/files/cliScript/incremental";

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DeviceConfig {
    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// REST API port on the device, when it is not the HTTP default
    #[serde(default)]
    pub port: Option<u16>,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            port: None,
        }
    }
}

#[derive(Deserialize)]
struct UploadResponse {
    description: String,
}

pub struct DeviceClient {
    client: Client,
    port: Option<u16>,
}

impl DeviceClient {
    pub fn new(config: &DeviceConfig) -> Result<Self, DeviceError> {
        // reqwest follows up to 10 redirects by default
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| DeviceError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            port: config.port,
        })
    }

    fn url(&self, ip: &str, path: &str) -> String {
        match self.port {
            Some(port) => format!("http://{ip}:{port}{path}"),
            None => format!("http://{ip}{path}"),
        }
    }

    /// `GET /api/v1/status`, returning the device JSON untouched.
    ///
    /// `authorization` is sent as-is; the device sits outside our trust
    /// boundary and is responsible for checking it.
    pub async fn status(
        &self,
        ip: &str,
        authorization: HeaderValue,
    ) -> Result<serde_json::Value, DeviceError> {
        let started = Instant::now();
        let result = self.fetch_status(ip, authorization).await;
        observe("status", started);
        result
    }

    /// `PUT /api/v1/files/cliScript/incremental` with `script` as a multipart
    /// `file` part, returning the device's `description`.
    pub async fn upload_incremental_cli_script(
        &self,
        ip: &str,
        authorization: HeaderValue,
        script: String,
    ) -> Result<String, DeviceError> {
        let started = Instant::now();
        let result = self.put_cli_script(ip, authorization, script).await;
        observe("upload_cli_script", started);
        result
    }

    async fn fetch_status(
        &self,
        ip: &str,
        authorization: HeaderValue,
    ) -> Result<serde_json::Value, DeviceError> {
        let resp = self
            .client
            .get(self.url(ip, STATUS_PATH))
            .header(header::AUTHORIZATION, sensitive(authorization))
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            return Err(DeviceError::rejected(status));
        }
        Ok(resp.json().await?)
    }

    async fn put_cli_script(
        &self,
        ip: &str,
        authorization: HeaderValue,
        script: String,
    ) -> Result<String, DeviceError> {
        let part = Part::text(script)
            .file_name(CLI_SCRIPT_FILE_NAME)
            .mime_str("text/plain")?;
        let form = Form::new().part("file", part);

        let resp = self
            .client
            .put(self.url(ip, INCREMENTAL_CLI_SCRIPT_PATH))
            .header(header::AUTHORIZATION, sensitive(authorization))
            .multipart(form)
            .send()
            .await?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            return Err(DeviceError::rejected(status));
        }
        let body: UploadResponse = resp.json().await?;
        Ok(body.description)
    }
}

fn sensitive(mut value: HeaderValue) -> HeaderValue {
    value.set_sensitive(true);
    value
}

fn observe(operation: &str, started: Instant) {
    DEVICE_REQUEST_DURATION
        .with_label_values(&[operation])
        .observe(started.elapsed().as_secs_f64());
}
