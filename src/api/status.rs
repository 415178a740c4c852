use axum::{
    extract::{Path, State},
    response::Response,
};
use lazy_static::lazy_static;
use regex::Regex;

use super::{respond, ApiError, Envelope};
use crate::auth;
use crate::device::DeviceError;
use crate::routing::AppState;

lazy_static! {
    static ref DOTTED_QUAD_RE: Regex = Regex::new(
        r"^(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$"
    )
    .unwrap();
}

/// Four decimal octets in 0-255. Leading zeros (`010`) are tolerated.
pub fn is_dotted_quad(ip: &str) -> bool {
    DOTTED_QUAD_RE.is_match(ip)
}

/// `GET /sbcStatus/{ip}`
pub async fn sbc_status(State(app): State<AppState>, Path(ip): Path<String>) -> Response {
    respond("sbcStatus", fetch_status(&app, &ip).await)
}

async fn fetch_status(app: &AppState, ip: &str) -> Result<Envelope, ApiError> {
    // 1) validate the address before touching anything remote
    if !is_dotted_quad(ip) {
        return Err(ApiError::BadRequest(
            "Supplied IP address is incorrect.".into(),
        ));
    }

    // 2) resolve the SBC credentials
    let secret = app
        .secrets
        .get_secret(&app.secret_name)
        .await
        .map_err(|e| {
            tracing::warn!(ip = %ip, error = %e, "Secret resolution failed");
            ApiError::Internal(format!(
                "Failed to fetch connection string from SM with message: {e}"
            ))
        })?;
    let authorization =
        auth::authorization_from_secret(&secret).map_err(|e| ApiError::Internal(e.to_string()))?;

    // 3) ask the device
    let data = app.device.status(ip, authorization).await.map_err(|e| {
        tracing::warn!(ip = %ip, error = %e, "SBC status request failed");
        match e {
            DeviceError::Rejected { status_text, .. } => ApiError::Internal(format!(
                "Failed to get SBC status. The following error was received from downstream device: {status_text}"
            )),
            other => ApiError::Internal(other.to_string()),
        }
    })?;

    Ok(Envelope::data(data))
}
