//! Gateway to the remote venue-booking API

pub mod auth;
pub mod bookings;
pub mod client;
pub mod format;
pub mod uploads;
pub mod venues;

use async_trait::async_trait;

pub use client::GatewayClient;
pub use format::ApiResult;

use crate::error::ClientResult;
use crate::models::{AuthPayload, GoogleLoginRequest, LoginRequest, ProfileEnvelope, SearchFilter, SignupRequest, Venue};

/// Calls the session store needs from the gateway
#[async_trait]
pub trait AuthGateway: Send + Sync {
    fn credential(&self) -> Option<String>;
    fn set_credential(&self, credential: Option<&str>) -> ClientResult<()>;
    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthPayload>;
    async fn signup(&self, request: &SignupRequest) -> ApiResult<AuthPayload>;
    async fn google_login(&self, request: &GoogleLoginRequest) -> ApiResult<AuthPayload>;
    async fn fetch_profile(&self) -> ApiResult<ProfileEnvelope>;
}

/// Calls the search view needs from the gateway
#[async_trait]
pub trait VenueGateway: Send + Sync {
    async fn search(&self, filter: &SearchFilter) -> ApiResult<Vec<Venue>>;
}

#[async_trait]
impl AuthGateway for GatewayClient {
    fn credential(&self) -> Option<String> {
        GatewayClient::credential(self)
    }

    fn set_credential(&self, credential: Option<&str>) -> ClientResult<()> {
        GatewayClient::set_credential(self, credential)
    }

    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthPayload> {
        GatewayClient::login(self, request).await
    }

    async fn signup(&self, request: &SignupRequest) -> ApiResult<AuthPayload> {
        GatewayClient::signup(self, request).await
    }

    async fn google_login(&self, request: &GoogleLoginRequest) -> ApiResult<AuthPayload> {
        GatewayClient::google_login(self, request).await
    }

    async fn fetch_profile(&self) -> ApiResult<ProfileEnvelope> {
        self.profile().await
    }
}

#[async_trait]
impl VenueGateway for GatewayClient {
    async fn search(&self, filter: &SearchFilter) -> ApiResult<Vec<Venue>> {
        self.search_venues(filter).await
    }
}
