//! Authentication context shared by every view
//!
//! One `SessionStore` exists per process. Views read it through
//! [`SessionStore::snapshot`]; only the operations defined here mutate it,
//! and each replaces credential and profile together.

pub mod claims;

use std::sync::{Arc, RwLock};

use serde::Serialize;

use crate::api::{ApiResult, AuthGateway};
use crate::error::{ClientError, ClientResult};
use crate::models::{AuthPayload, GoogleLoginRequest, LoginRequest, Profile, SignupRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Booting,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Booting,
    Authenticated,
    Anonymous,
}

/// Credential, profile and loading phase.
///
/// A profile is only ever held together with the credential it was
/// validated with; the constructors are the only way to build one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    #[serde(skip)]
    credential: Option<String>,
    profile: Option<Profile>,
    phase: SessionPhase,
}

impl Session {
    pub fn booting(credential: Option<String>) -> Self {
        Self {
            credential,
            profile: None,
            phase: SessionPhase::Booting,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            credential: None,
            profile: None,
            phase: SessionPhase::Ready,
        }
    }

    pub fn authenticated(credential: String, profile: Profile) -> Self {
        Self {
            credential: Some(credential),
            profile: Some(profile),
            phase: SessionPhase::Ready,
        }
    }

    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn status(&self) -> SessionStatus {
        match (self.phase, &self.profile) {
            (SessionPhase::Booting, _) => SessionStatus::Booting,
            (SessionPhase::Ready, Some(_)) => SessionStatus::Authenticated,
            (SessionPhase::Ready, None) => SessionStatus::Anonymous,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.status() == SessionStatus::Authenticated
    }

    /// Owner capability of the authenticated profile
    pub fn is_owner(&self) -> bool {
        self.profile.as_ref().map(|p| p.owner).unwrap_or(false)
    }
}

/// Process-wide authentication context
pub struct SessionStore {
    gateway: Arc<dyn AuthGateway>,
    state: RwLock<Session>,
}

impl SessionStore {
    /// New store in the `booting` phase, holding whatever credential the
    /// gateway restored from storage
    pub fn new(gateway: Arc<dyn AuthGateway>) -> Self {
        let credential = gateway.credential();
        Self {
            gateway,
            state: RwLock::new(Session::booting(credential)),
        }
    }

    /// Construct and bootstrap in one step
    pub async fn start(gateway: Arc<dyn AuthGateway>) -> Self {
        let store = Self::new(gateway);
        store.bootstrap().await;
        store
    }

    /// Validate the persisted credential against the API.
    ///
    /// A rejected credential is cleared silently and the session becomes
    /// anonymous; it is never reported as an error.
    pub async fn bootstrap(&self) -> SessionStatus {
        let Some(credential) = self.gateway.credential() else {
            self.replace(Session::anonymous());
            tracing::debug!("No persisted credential, session is anonymous");
            return SessionStatus::Anonymous;
        };

        let result = self.gateway.fetch_profile().await;
        match result.data {
            Some(envelope) if result.ok => {
                tracing::info!(user = %envelope.profile.email, "Restored session from persisted credential");
                self.replace(Session::authenticated(credential, envelope.profile));
                SessionStatus::Authenticated
            }
            _ => {
                tracing::info!(
                    reason = result.error.as_deref().unwrap_or("no profile"),
                    "Persisted credential rejected, clearing it"
                );
                if let Err(e) = self.gateway.set_credential(None) {
                    tracing::warn!("Could not clear rejected credential: {}", e);
                }
                self.replace(Session::anonymous());
                SessionStatus::Anonymous
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<Profile> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let result = self.gateway.login(&request).await;
        self.apply_authentication(result)
    }

    pub async fn signup(&self, request: &SignupRequest) -> ClientResult<Profile> {
        let result = self.gateway.signup(request).await;
        self.apply_authentication(result)
    }

    pub async fn google_login(&self, request: &GoogleLoginRequest) -> ClientResult<Profile> {
        let result = self.gateway.google_login(request).await;
        self.apply_authentication(result)
    }

    /// Clear credential and profile unconditionally.
    ///
    /// The in-memory session and the gateway's held credential are both gone
    /// afterwards even if removing the persisted credential failed; that
    /// failure is still returned.
    pub fn logout(&self) -> ClientResult<()> {
        let cleared = self.gateway.set_credential(None);
        self.replace(Session::anonymous());
        tracing::info!("Logged out");
        cleared
    }

    /// Re-fetch the profile for the held credential and replace it wholesale
    pub async fn refresh_profile(&self) -> ClientResult<Profile> {
        let Some(credential) = self.gateway.credential() else {
            return Err(ClientError::Unauthorized("Not logged in".to_string()));
        };

        let result = self.gateway.fetch_profile().await;
        match result.into_result() {
            Ok(envelope) => {
                self.replace(Session::authenticated(credential, envelope.profile.clone()));
                Ok(envelope.profile)
            }
            Err(e) if e.is_auth_failure() => {
                tracing::info!("Credential rejected on profile refresh, clearing session");
                if let Err(clear) = self.gateway.set_credential(None) {
                    tracing::warn!("Could not clear rejected credential: {}", clear);
                }
                self.replace(Session::anonymous());
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Owned copy of the current session
    pub fn snapshot(&self) -> Session {
        self.state
            .read()
            .map(|s| s.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn status(&self) -> SessionStatus {
        self.snapshot().status()
    }

    /// Persist the credential, then swap in the new session. On any failure
    /// the current session is left untouched.
    fn apply_authentication(&self, result: ApiResult<AuthPayload>) -> ClientResult<Profile> {
        let payload = result.into_result()?;
        self.gateway.set_credential(Some(&payload.token))?;

        tracing::info!(user = %payload.profile.email, owner = payload.profile.owner, "Authenticated");
        self.replace(Session::authenticated(payload.token, payload.profile.clone()));
        Ok(payload.profile)
    }

    fn replace(&self, session: Session) {
        match self.state.write() {
            Ok(mut state) => *state = session,
            Err(poisoned) => *poisoned.into_inner() = session,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProfileEnvelope;
    use crate::storage::{CredentialStore, MemoryCredentialStore};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Gateway double: credential lives in a memory store, responses are scripted
    struct ScriptedGateway {
        store: MemoryCredentialStore,
        credential: Mutex<Option<String>>,
        login: Mutex<Option<ApiResult<AuthPayload>>>,
        profile: Mutex<Option<ApiResult<ProfileEnvelope>>>,
        fail_storage: bool,
    }

    impl ScriptedGateway {
        fn new(persisted: Option<&str>) -> Self {
            let store = match persisted {
                Some(token) => MemoryCredentialStore::with_credential(token),
                None => MemoryCredentialStore::new(),
            };
            Self {
                credential: Mutex::new(persisted.map(str::to_string)),
                store,
                login: Mutex::new(None),
                profile: Mutex::new(None),
                fail_storage: false,
            }
        }

        fn on_login(self, result: ApiResult<AuthPayload>) -> Self {
            *self.login.lock().unwrap() = Some(result);
            self
        }

        fn on_profile(self, result: ApiResult<ProfileEnvelope>) -> Self {
            *self.profile.lock().unwrap() = Some(result);
            self
        }
    }

    #[async_trait]
    impl AuthGateway for ScriptedGateway {
        fn credential(&self) -> Option<String> {
            self.credential.lock().unwrap().clone()
        }

        fn set_credential(&self, credential: Option<&str>) -> ClientResult<()> {
            let storage = || {
                if self.fail_storage {
                    return Err(ClientError::Storage(std::io::Error::new(
                        std::io::ErrorKind::PermissionDenied,
                        "read-only",
                    )));
                }
                match credential {
                    Some(token) => self.store.save(token),
                    None => self.store.clear(),
                }
            };
            match credential {
                Some(token) => {
                    storage()?;
                    *self.credential.lock().unwrap() = Some(token.to_string());
                    Ok(())
                }
                None => {
                    *self.credential.lock().unwrap() = None;
                    storage()
                }
            }
        }

        async fn login(&self, _request: &LoginRequest) -> ApiResult<AuthPayload> {
            self.login
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| ApiResult::failure(Some(401), "Invalid credentials."))
        }

        async fn signup(&self, request: &SignupRequest) -> ApiResult<AuthPayload> {
            ApiResult::success(AuthPayload {
                token: "signup-token".to_string(),
                profile: profile(&request.email, request.is_venue_owner),
            })
        }

        async fn google_login(&self, _request: &GoogleLoginRequest) -> ApiResult<AuthPayload> {
            ApiResult::failure(Some(500), "GOOGLE_CLIENT_ID not configured on server.")
        }

        async fn fetch_profile(&self) -> ApiResult<ProfileEnvelope> {
            self.profile
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| ApiResult::failure(Some(401), "Token expired."))
        }
    }

    fn profile(email: &str, owner: bool) -> Profile {
        Profile {
            id: "u1".to_string(),
            email: email.to_string(),
            display_name: String::new(),
            contact_number: String::new(),
            owner,
            role: if owner { "owner" } else { "user" }.to_string(),
            auth_provider: "password".to_string(),
        }
    }

    fn login_ok(token: &str, owner: bool) -> ApiResult<AuthPayload> {
        ApiResult::success(AuthPayload {
            token: token.to_string(),
            profile: profile("a@b.com", owner),
        })
    }

    #[tokio::test]
    async fn login_stores_credential_and_profile() {
        let gateway = Arc::new(ScriptedGateway::new(None).on_login(login_ok("t1", false)));
        let store = SessionStore::start(gateway.clone()).await;

        let profile = store.login("a@b.com", "secret").await.unwrap();
        assert!(!profile.owner);

        let session = store.snapshot();
        assert_eq!(session.credential(), Some("t1"));
        assert_eq!(session.profile().map(|p| p.owner), Some(false));
        assert_eq!(session.status(), SessionStatus::Authenticated);
        assert_eq!(gateway.store.peek().as_deref(), Some("t1"));
    }

    #[tokio::test]
    async fn login_then_logout_leaves_nothing_persisted() {
        let gateway = Arc::new(ScriptedGateway::new(None).on_login(login_ok("t1", true)));
        let store = SessionStore::start(gateway.clone()).await;

        store.login("a@b.com", "secret").await.unwrap();
        store.logout().unwrap();

        assert_eq!(store.snapshot(), Session::anonymous());
        assert_eq!(gateway.store.peek(), None);
        assert_eq!(gateway.credential(), None);
    }

    #[tokio::test]
    async fn logout_twice_matches_logout_once() {
        let gateway = Arc::new(ScriptedGateway::new(None).on_login(login_ok("t1", false)));
        let store = SessionStore::start(gateway.clone()).await;
        store.login("a@b.com", "secret").await.unwrap();

        store.logout().unwrap();
        let once = store.snapshot();
        store.logout().unwrap();

        assert_eq!(store.snapshot(), once);
        assert_eq!(gateway.store.peek(), None);
    }

    #[tokio::test]
    async fn failed_login_leaves_state_untouched() {
        let gateway = Arc::new(
            ScriptedGateway::new(Some("t0")).on_profile(ApiResult::success(ProfileEnvelope {
                profile: profile("old@b.com", false),
            })),
        );
        let store = SessionStore::start(gateway.clone()).await;
        let before = store.snapshot();

        let err = store.login("a@b.com", "wrong").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials.");
        assert!(err.is_auth_failure());
        assert_eq!(store.snapshot(), before);
        assert_eq!(gateway.store.peek().as_deref(), Some("t0"));
    }

    #[tokio::test]
    async fn rejected_persisted_credential_heals_to_anonymous() {
        let gateway = Arc::new(ScriptedGateway::new(Some("expired")));
        let store = SessionStore::new(gateway.clone());
        assert_eq!(store.status(), SessionStatus::Booting);

        let status = store.bootstrap().await;
        assert_eq!(status, SessionStatus::Anonymous);
        assert_eq!(store.snapshot(), Session::anonymous());
        assert_eq!(gateway.store.peek(), None);
    }

    #[tokio::test]
    async fn valid_persisted_credential_restores_profile() {
        let gateway = Arc::new(
            ScriptedGateway::new(Some("t9")).on_profile(ApiResult::success(ProfileEnvelope {
                profile: profile("owner@b.com", true),
            })),
        );
        let store = SessionStore::start(gateway).await;

        let session = store.snapshot();
        assert_eq!(session.status(), SessionStatus::Authenticated);
        assert_eq!(session.credential(), Some("t9"));
        assert!(session.is_owner());
    }

    #[tokio::test]
    async fn no_persisted_credential_skips_profile_fetch() {
        let gateway = Arc::new(ScriptedGateway::new(None));
        let store = SessionStore::start(gateway).await;
        assert_eq!(store.status(), SessionStatus::Anonymous);
    }

    #[tokio::test]
    async fn signup_authenticates_like_login() {
        let gateway = Arc::new(ScriptedGateway::new(None));
        let store = SessionStore::start(gateway.clone()).await;

        let request = SignupRequest {
            email: "new@b.com".into(),
            password: "secret".into(),
            is_venue_owner: true,
            ..Default::default()
        };
        store.signup(&request).await.unwrap();

        assert!(store.snapshot().is_owner());
        assert_eq!(gateway.store.peek().as_deref(), Some("signup-token"));
    }

    #[tokio::test]
    async fn storage_failure_on_login_does_not_authenticate() {
        let mut gateway = ScriptedGateway::new(None).on_login(login_ok("t1", false));
        gateway.fail_storage = true;
        let gateway = Arc::new(gateway);
        let store = SessionStore::new(gateway);
        store.replace(Session::anonymous());

        let err = store.login("a@b.com", "secret").await.unwrap_err();
        assert_eq!(err.error_code(), "STORAGE_ERROR");
        assert_eq!(store.snapshot(), Session::anonymous());
    }

    #[tokio::test]
    async fn logout_with_failing_storage_still_drops_credential() {
        let mut gateway = ScriptedGateway::new(Some("t1")).on_profile(ApiResult::success(ProfileEnvelope {
            profile: profile("a@b.com", false),
        }));
        gateway.fail_storage = true;
        let gateway = Arc::new(gateway);
        let store = SessionStore::start(gateway.clone()).await;
        assert_eq!(store.status(), SessionStatus::Authenticated);

        let err = store.logout().unwrap_err();
        assert_eq!(err.error_code(), "STORAGE_ERROR");
        assert_eq!(store.snapshot(), Session::anonymous());
        assert_eq!(gateway.credential(), None);
    }

    #[tokio::test]
    async fn rejected_credential_is_not_resent_when_storage_fails() {
        let mut gateway = ScriptedGateway::new(Some("expired"));
        gateway.fail_storage = true;
        let gateway = Arc::new(gateway);

        let store = SessionStore::start(gateway.clone()).await;
        assert_eq!(store.status(), SessionStatus::Anonymous);
        assert_eq!(gateway.credential(), None);
    }

    #[tokio::test]
    async fn google_failure_surfaces_server_message() {
        let gateway = Arc::new(ScriptedGateway::new(None));
        let store = SessionStore::start(gateway).await;

        let err = store
            .google_login(&GoogleLoginRequest {
                id_token: "id".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "GOOGLE_CLIENT_ID not configured on server.");
        assert_eq!(store.status(), SessionStatus::Anonymous);
    }

    #[tokio::test]
    async fn refresh_with_rejected_credential_clears_session() {
        let gateway = Arc::new(ScriptedGateway::new(None).on_login(login_ok("t1", false)));
        let store = SessionStore::start(gateway.clone()).await;
        store.login("a@b.com", "secret").await.unwrap();

        let err = store.refresh_profile().await.unwrap_err();
        assert!(err.is_auth_failure());
        assert_eq!(store.status(), SessionStatus::Anonymous);
        assert_eq!(gateway.store.peek(), None);
    }
}
