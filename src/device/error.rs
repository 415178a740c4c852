use thiserror::Error;

/// Failures talking to an SBC REST API
#[derive(Error, Debug)]
pub enum DeviceError {
    /// The device answered with something other than 200
    #[error("{status_text}")]
    Rejected { status: u16, status_text: String },

    /// Timeout, DNS failure, refused connection, ...
    #[error("{0}")]
    Transport(String),

    /// A 200 response whose body could not be interpreted
    #[error("{0}")]
    Decode(String),
}

impl From<reqwest::Error> for DeviceError {
    fn from(e: reqwest::Error) -> Self {
        let is_decode = e.is_decode();
        // keep the whole source chain; the top-level reqwest text omits the cause
        let text = format!("{:#}", anyhow::Error::from(e));
        if is_decode {
            DeviceError::Decode(text)
        } else {
            DeviceError::Transport(text)
        }
    }
}

impl DeviceError {
    pub(crate) fn rejected(status: reqwest::StatusCode) -> Self {
        DeviceError::Rejected {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }
}
