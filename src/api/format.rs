use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Message for a failed call whose body carried no `error` field
pub const REQUEST_FAILED: &str = "Request failed";

/// Uniform result of every gateway call: `{ ok, data?, error? }`
///
/// This is also the envelope the remote API wraps every body in, so a
/// successful response deserializes straight into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResult<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// HTTP status the result came from; `None` when no response arrived
    #[serde(skip)]
    pub status: Option<u16>,
}

impl<T> ApiResult<T> {
    pub fn success(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
            status: Some(200),
        }
    }

    pub fn failure(status: Option<u16>, error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
            status,
        }
    }

    /// Failure with no response, e.g. connection refused
    pub fn network_failure(detail: impl std::fmt::Display) -> Self {
        Self::failure(None, format!("Network error: {}", detail))
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn is_success(&self) -> bool {
        self.ok && self.data.is_some()
    }

    /// Error message as shown to the user
    pub fn error_message(&self) -> &str {
        self.error.as_deref().unwrap_or(REQUEST_FAILED)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResult<U> {
        ApiResult {
            ok: self.ok,
            data: self.data.map(f),
            error: self.error,
            status: self.status,
        }
    }

    pub fn into_result(self) -> Result<T, ClientError> {
        match (self.ok, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(ClientError::invalid_response("Response carried no data")),
            (false, _) => {
                let message = self.error.unwrap_or_else(|| REQUEST_FAILED.to_string());
                match self.status {
                    None => Err(ClientError::network(message)),
                    Some(status) => Err(ClientError::from_status(status, message)),
                }
            }
        }
    }
}
