use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
    response::Response,
};
use serde::Deserialize;
use serde_json::Value;

use super::{respond, ApiError, Envelope};
use crate::auth;
use crate::device::DeviceError;
use crate::routing::AppState;
use crate::template::{self, TenantFields};

/// `PUT /newTenant` body. Fields are kept as raw JSON so that presence is the
/// only thing checked; `cacLimit` may arrive as a number or a string.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTenantRequest {
    #[serde(default)]
    pub tenant_name: Option<Value>,
    #[serde(default)]
    pub cac_limit: Option<Value>,
    #[serde(default)]
    pub trunk_fqdn: Option<Value>,
    #[serde(default)]
    pub sbc_ip: Option<Value>,
}

/// Missing, `null` and `""` all count as absent
fn field_text(value: &Option<Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

/// Bodies are only parsed when declared as `application/json`; anything
/// else is treated as `{}` and fails the presence check.
fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
}

/// `PUT /newTenant`
pub async fn new_tenant(State(app): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    respond("newTenant", provision(&app, &headers, &body).await)
}

async fn provision(
    app: &AppState,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Envelope<String>, ApiError> {
    // 1) presence checks, no outbound calls before these pass
    let req: NewTenantRequest = if !is_json(headers) || body.iter().all(u8::is_ascii_whitespace) {
        NewTenantRequest::default()
    } else {
        serde_json::from_slice(body)
            .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {e}")))?
    };

    let tenant_name = field_text(&req.tenant_name);
    let cac_limit = field_text(&req.cac_limit);
    let trunk_fqdn = field_text(&req.trunk_fqdn);
    let sbc_ip = field_text(&req.sbc_ip);
    let authorization = auth::passthrough_authorization(headers).ok();

    let mut missing = Vec::new();
    for (name, present) in [
        ("tenantName", tenant_name.is_some()),
        ("cacLimit", cac_limit.is_some()),
        ("trunkFqdn", trunk_fqdn.is_some()),
        ("sbcIp", sbc_ip.is_some()),
        ("Authorization header", authorization.is_some()),
    ] {
        if !present {
            missing.push(name);
        }
    }
    let (Some(tenant_name), Some(cac_limit), Some(trunk_fqdn), Some(sbc_ip), Some(authorization)) =
        (tenant_name, cac_limit, trunk_fqdn, sbc_ip, authorization)
    else {
        return Err(ApiError::BadRequest(format!(
            "Missing required field(s): {}",
            missing.join(", ")
        )));
    };

    // 2) template
    let text = app.templates.load_new_tenant().await.map_err(|e| {
        tracing::error!(error = %e, "CLI script template unreadable");
        ApiError::Internal(format!("Failed to read CLI script template: {e}"))
    })?;

    // 3) render
    let script = template::render(
        &text,
        &TenantFields {
            tenant_name: tenant_name.clone(),
            trunk_fqdn,
            cac_limit,
        },
    );

    // 4) upload
    let description = app
        .device
        .upload_incremental_cli_script(&sbc_ip, authorization, script)
        .await
        .map_err(|e| {
            tracing::warn!(sbc_ip = %sbc_ip, tenant = %tenant_name, error = %e, "CLI script upload failed");
            match e {
                DeviceError::Rejected { status_text, .. } => ApiError::BadRequest(format!(
                    "Failed to upload CLI script. The following error was received from downstream device: {status_text}"
                )),
                other => ApiError::Internal(other.to_string()),
            }
        })?;

    tracing::info!(sbc_ip = %sbc_ip, tenant = %tenant_name, "Tenant CLI script applied");
    Ok(Envelope::data(description))
}
