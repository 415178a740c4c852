use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::GatewayConfig;
use crate::device::DeviceClient;
use crate::metrics;
use crate::secret_store::{self, SecretProvider};
use crate::template::TemplateStore;

/// Everything a handler needs, built once at startup. Requests share no
/// mutable state.
#[derive(Clone)]
pub struct AppState {
    pub(crate) secrets: Arc<dyn SecretProvider>,
    /// Secret holding the SBC `Authorization` value for status queries
    pub(crate) secret_name: Arc<str>,
    pub(crate) device: Arc<DeviceClient>,
    pub(crate) templates: Arc<TemplateStore>,
}

impl AppState {
    pub fn new(
        secrets: Arc<dyn SecretProvider>,
        secret_name: impl Into<Arc<str>>,
        device: DeviceClient,
        templates: TemplateStore,
    ) -> Self {
        Self {
            secrets,
            secret_name: secret_name.into(),
            device: Arc::new(device),
            templates: Arc::new(templates),
        }
    }

    pub async fn from_config(cfg: &GatewayConfig) -> anyhow::Result<Self> {
        if cfg.secret_store.secret_name.is_empty() {
            tracing::warn!("No secret name configured; /sbcStatus requests will fail");
        }
        let secrets = secret_store::from_config(&cfg.secret_store).await;
        let device = DeviceClient::new(&cfg.device)?;
        let templates = TemplateStore::new(&cfg.templates.new_tenant);
        Ok(Self::new(
            secrets,
            cfg.secret_store.secret_name.as_str(),
            device,
            templates,
        ))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/test", get(api::test_page))
        .route("/sbcStatus/{ip}", get(api::status::sbc_status))
        .route("/newTenant", put(api::tenant::new_tenant))
        .route("/metrics", get(metrics::metrics_handler))
        .fallback(api::not_found)
        .method_not_allowed_fallback(api::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
