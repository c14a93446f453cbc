use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::backends::github::GitHubError;

pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal server error";

/// Failures while handling a webhook delivery.
///
/// Every variant renders as the same opaque 500 response; the detail only
/// goes to the logs.
#[derive(Debug, Error)]
pub enum ErrorCode {
    #[error("Malformed event body: '{0}'")]
    MalformedEventBody(#[from] serde_json::Error),
    #[error("Could not update commit status: '{0}'")]
    StatusUpdateFailed(#[from] GitHubError),
}

#[derive(Serialize)]
pub struct ErrorCodeDetail {
    #[serde(skip)]
    status_code: StatusCode,
    message: &'static str,
}

impl ErrorCode {
    pub fn details(&self) -> ErrorCodeDetail {
        self.into()
    }
}

impl ErrorCodeDetail {
    pub fn server_error() -> Self {
        Self {
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            message: INTERNAL_SERVER_ERROR_MESSAGE,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    pub fn message(&self) -> &str {
        self.message
    }
}

impl From<&ErrorCode> for ErrorCodeDetail {
    fn from(_: &ErrorCode) -> Self {
        Self::server_error()
    }
}
