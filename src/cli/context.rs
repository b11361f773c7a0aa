use std::sync::Arc;

use crate::api::GatewayClient;
use crate::cli::config::{credentials_path, load_environment_config};
use crate::config::{config, ClientConfig};
use crate::router::{navigate, Navigation, Route};
use crate::session::{Session, SessionStatus, SessionStore};
use crate::storage::FileCredentialStore;

/// Everything a command needs: configuration, the gateway and the session
pub struct AppContext {
    pub config: ClientConfig,
    pub gateway: Arc<GatewayClient>,
    pub session: SessionStore,
}

impl AppContext {
    /// Wire config, credential storage and gateway. The session starts in
    /// the booting phase; call [`AppContext::boot`] before reading it.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = config().clone();
        config.api.base_url = load_environment_config()?.api_url_or(&config);

        let store = FileCredentialStore::new(credentials_path()?, config.session.credential_key.clone());
        let gateway = Arc::new(GatewayClient::from_config(&config, Arc::new(store)));
        let session = SessionStore::new(gateway.clone());

        tracing::debug!(api = %gateway.base_url(), "cli context ready");
        Ok(Self { config, gateway, session })
    }

    pub async fn boot(&self) -> SessionStatus {
        self.session.bootstrap().await
    }

    pub fn currency(&self) -> &str {
        &self.config.display.currency
    }

    /// Boot the session and navigate to `location`, failing with the
    /// redirect if the guard turns the user away
    pub async fn enter(&self, location: &str) -> anyhow::Result<(Session, Navigation)> {
        self.boot().await;
        let session = self.session.snapshot();
        let nav = navigate(&session, location);
        if let Navigation::Redirect { from, to } = &nav {
            return Err(redirect_error(*from, *to));
        }
        Ok((session, nav))
    }

    /// Like [`AppContext::enter`] for commands that stand in for a guarded page
    pub async fn require(&self, route: Route) -> anyhow::Result<Session> {
        self.enter(route.path()).await.map(|(session, _)| session)
    }
}

fn redirect_error(from: Route, to: Route) -> anyhow::Error {
    match to {
        Route::Login => anyhow::anyhow!(
            "Login required for {} (redirected to {}). Run 'halls auth login' first",
            from.title(),
            to
        ),
        _ => anyhow::anyhow!(
            "{} is only available to venue owners (redirected to {})",
            from.title(),
            to
        ),
    }
}
