use std::sync::{Arc, RwLock};
use std::time::Instant;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::api::format::{ApiResult, REQUEST_FAILED};
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::storage::CredentialStore;

/// HTTP gateway to the venue-booking API
///
/// Every call is a single attempt and always yields an [`ApiResult`]; no
/// failure escapes as an `Err` or a panic.
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: String,
    credential: RwLock<Option<String>>,
    store: Arc<dyn CredentialStore>,
    log_requests: bool,
}

impl GatewayClient {
    /// Build a client and restore the persisted credential, if any
    pub fn new(base_url: impl Into<String>, store: Arc<dyn CredentialStore>) -> Self {
        Self::with_user_agent(base_url, store, &format!("halls/{}", env!("CARGO_PKG_VERSION")))
    }

    fn with_user_agent(base_url: impl Into<String>, store: Arc<dyn CredentialStore>, user_agent: &str) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });

        let credential = match store.load() {
            Ok(credential) => credential,
            Err(e) => {
                tracing::warn!("Ignoring unreadable persisted credential: {}", e);
                None
            }
        };

        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credential: RwLock::new(credential),
            store,
            log_requests: true,
        }
    }

    pub fn from_config(config: &ClientConfig, store: Arc<dyn CredentialStore>) -> Self {
        let mut client = Self::with_user_agent(config.api.base_url.clone(), store, &config.api.user_agent);
        client.log_requests = config.logging.enable_request_logging;
        client
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credential(&self) -> Option<String> {
        self.credential.read().map(|c| c.clone()).unwrap_or(None)
    }

    /// Set or clear the credential in memory and in persisted storage.
    ///
    /// A new credential is stored first and only held in memory once that
    /// succeeded. Clearing always drops the in-memory credential, even when
    /// the store fails; the storage error is still returned.
    pub fn set_credential(&self, credential: Option<&str>) -> ClientResult<()> {
        match credential {
            Some(token) => {
                self.store.save(token)?;
                self.hold(Some(token.to_string()));
                Ok(())
            }
            None => {
                self.hold(None);
                self.store.clear()
            }
        }
    }

    fn hold(&self, credential: Option<String>) {
        match self.credential.write() {
            Ok(mut current) => *current = credential,
            Err(poisoned) => *poisoned.into_inner() = credential,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request::<T, Value>(Method::GET, path, None).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<T> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<T> {
        self.request(Method::PATCH, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request::<T, Value>(Method::DELETE, path, None).await
    }

    /// Issue one call and normalize the outcome
    pub async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let started = Instant::now();

        let mut builder = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = self.credential() {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        if let Some(body) = body {
            match serde_json::to_vec(body) {
                Ok(bytes) => builder = builder.body(bytes),
                Err(e) => return ApiResult::failure(None, format!("Could not encode request body: {}", e)),
            }
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(%method, path, error = %e, "gateway call failed without a response");
                return ApiResult::network_failure(e);
            }
        };

        let status = response.status();
        if self.log_requests {
            tracing::debug!(
                %method,
                path,
                status = status.as_u16(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "gateway call"
            );
        }

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return ApiResult::network_failure(e).with_status(status.as_u16()),
        };

        normalize(status.as_u16(), status.is_success(), &text)
    }
}

/// Turn a raw status + body into the uniform result
pub(crate) fn normalize<T: DeserializeOwned>(status: u16, success: bool, body: &str) -> ApiResult<T> {
    if !success {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| REQUEST_FAILED.to_string());
        return ApiResult::failure(Some(status), message);
    }

    match serde_json::from_str::<ApiResult<T>>(body) {
        Ok(result) => result.with_status(status),
        Err(e) => ApiResult::failure(Some(status), format!("Invalid response from server: {}", e)),
    }
}

/// Build an absolute path from raw segments, percent-encoding each one
pub(crate) fn endpoint(segments: &[&str]) -> String {
    let mut url = match Url::parse("http://gateway.invalid/") {
        Ok(url) => url,
        Err(_) => return format!("/{}", segments.join("/")),
    };
    if let Ok(mut path) = url.path_segments_mut() {
        path.clear().extend(segments);
    }
    url.path().to_string()
}
