use serde::{Deserialize, Serialize};
use serde_json::json;

use super::client::GatewayClient;
use super::format::ApiResult;
use crate::models::{AuthPayload, GoogleLoginRequest, LoginRequest, ProfileEnvelope, SignupRequest};

/// `data` of the password-reset endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEnvelope {
    pub message: String,
}

/// `data` of `GET /health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl GatewayClient {
    pub async fn signup(&self, request: &SignupRequest) -> ApiResult<AuthPayload> {
        self.post("/auth/signup", request).await
    }

    pub async fn login(&self, request: &LoginRequest) -> ApiResult<AuthPayload> {
        self.post("/auth/login", request).await
    }

    pub async fn google_login(&self, request: &GoogleLoginRequest) -> ApiResult<AuthPayload> {
        self.post("/auth/google", request).await
    }

    /// Profile of the credential currently held
    pub async fn profile(&self) -> ApiResult<ProfileEnvelope> {
        self.get("/auth/me").await
    }

    pub async fn forgot_password(&self, email: &str) -> ApiResult<MessageEnvelope> {
        self.post("/auth/forgot-password", &json!({ "email": email })).await
    }

    pub async fn reset_password(&self, token: &str, new_password: &str) -> ApiResult<MessageEnvelope> {
        self.post(
            "/auth/reset-password",
            &json!({ "token": token, "new_password": new_password }),
        )
        .await
    }

    pub async fn health(&self) -> ApiResult<HealthStatus> {
        self.get("/health").await
    }
}
