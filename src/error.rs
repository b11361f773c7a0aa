// Client error types
use thiserror::Error;

/// Failure of a gateway call or of local credential storage
#[derive(Error, Debug)]
pub enum ClientError {
    // No response from the server at all
    #[error("{0}")]
    Network(String),

    // 400
    #[error("{0}")]
    BadRequest(String),

    // 401 - invalid password, expired or rejected credential
    #[error("{0}")]
    Unauthorized(String),

    // 403 - capability missing on the server side
    #[error("{0}")]
    Forbidden(String),

    // 404
    #[error("{0}")]
    NotFound(String),

    // 409 - date already booked, email already registered
    #[error("{0}")]
    Conflict(String),

    // 422 - server-side validation
    #[error("{0}")]
    Validation(String),

    // Any other non-success status
    #[error("{message}")]
    Server { status: u16, message: String },

    // Success status but the body was not the expected envelope
    #[error("{0}")]
    InvalidResponse(String),

    // Local input rejected before a request was issued
    #[error("{0}")]
    InvalidInput(String),

    #[error("Credential storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Credential storage is corrupt: {0}")]
    StorageFormat(#[from] serde_json::Error),
}

impl ClientError {
    /// Map an HTTP status and server message onto the taxonomy
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            400 => ClientError::BadRequest(message),
            401 => ClientError::Unauthorized(message),
            403 => ClientError::Forbidden(message),
            404 => ClientError::NotFound(message),
            409 => ClientError::Conflict(message),
            422 => ClientError::Validation(message),
            s if (200..300).contains(&s) => ClientError::InvalidResponse(message),
            status => ClientError::Server { status, message },
        }
    }

    /// HTTP status this error came from, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::BadRequest(_) => Some(400),
            ClientError::Unauthorized(_) => Some(401),
            ClientError::Forbidden(_) => Some(403),
            ClientError::NotFound(_) => Some(404),
            ClientError::Conflict(_) => Some(409),
            ClientError::Validation(_) => Some(422),
            ClientError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Stable error code for `--json` output
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Network(_) => "NETWORK_ERROR",
            ClientError::BadRequest(_) => "BAD_REQUEST",
            ClientError::Unauthorized(_) => "UNAUTHORIZED",
            ClientError::Forbidden(_) => "FORBIDDEN",
            ClientError::NotFound(_) => "NOT_FOUND",
            ClientError::Conflict(_) => "CONFLICT",
            ClientError::Validation(_) => "VALIDATION_ERROR",
            ClientError::Server { .. } => "SERVER_ERROR",
            ClientError::InvalidResponse(_) => "INVALID_RESPONSE",
            ClientError::InvalidInput(_) => "INVALID_INPUT",
            ClientError::Storage(_) | ClientError::StorageFormat(_) => "STORAGE_ERROR",
        }
    }

    /// True when the server rejected the credential itself
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ClientError::Unauthorized(_))
    }
}

impl ClientError {
    pub fn network(message: impl Into<String>) -> Self {
        ClientError::Network(message.into())
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        ClientError::InvalidResponse(message.into())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        ClientError::InvalidInput(message.into())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
