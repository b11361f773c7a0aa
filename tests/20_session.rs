mod common;

use std::sync::Arc;

use anyhow::Result;
use hallsbook::api::GatewayClient;
use hallsbook::error::ClientResult;
use hallsbook::router::{navigate, Navigation, Route};
use hallsbook::session::{SessionStatus, SessionStore};
use hallsbook::storage::CredentialStore;

/// Holds a member credential that can never be removed
struct StuckStore;

impl CredentialStore for StuckStore {
    fn load(&self) -> ClientResult<Option<String>> {
        Ok(Some(common::MEMBER_TOKEN.to_string()))
    }

    fn save(&self, _credential: &str) -> ClientResult<()> {
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
    }
}

#[tokio::test]
async fn login_then_logout_leaves_no_credential_behind() -> Result<()> {
    let api = common::FakeApi::start().await?;
    let (gateway, store) = api.client(None);
    let session = SessionStore::start(gateway.clone()).await;
    assert_eq!(session.status(), SessionStatus::Anonymous);

    let profile = session.login("a@b.com", "secret").await?;
    assert!(!profile.owner);
    let snapshot = session.snapshot();
    assert_eq!(snapshot.credential(), Some(common::MEMBER_TOKEN));
    assert_eq!(store.load()?, Some(common::MEMBER_TOKEN.to_string()));

    session.logout()?;
    session.logout()?;
    assert_eq!(session.status(), SessionStatus::Anonymous);
    assert_eq!(store.load()?, None);
    assert_eq!(gateway.credential(), None);
    Ok(())
}

#[tokio::test]
async fn logout_stops_sending_credential_even_if_storage_fails() -> Result<()> {
    let api = common::FakeApi::start().await?;
    let gateway = Arc::new(GatewayClient::new(api.base_url.clone(), Arc::new(StuckStore)));
    let session = SessionStore::start(gateway.clone()).await;
    assert_eq!(session.status(), SessionStatus::Authenticated);

    assert!(session.logout().is_err());
    assert_eq!(session.status(), SessionStatus::Anonymous);
    assert_eq!(gateway.credential(), None);

    gateway.health().await;
    assert_eq!(api.authorization_headers().last(), Some(&None));
    Ok(())
}

#[tokio::test]
async fn wrong_password_keeps_session_anonymous() -> Result<()> {
    let api = common::FakeApi::start().await?;
    let (gateway, store) = api.client(None);
    let session = SessionStore::start(gateway).await;

    let err = session.login("a@b.com", "nope").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid email or password.");
    assert_eq!(session.status(), SessionStatus::Anonymous);
    assert_eq!(store.load()?, None);
    Ok(())
}

#[tokio::test]
async fn persisted_credential_restores_the_session() -> Result<()> {
    let api = common::FakeApi::start().await?;
    let (gateway, _) = api.client(Some(common::OWNER_TOKEN));

    let session = SessionStore::start(gateway).await;
    let snapshot = session.snapshot();
    assert!(snapshot.is_owner());
    assert_eq!(
        navigate(&snapshot, "/owner/venues"),
        Navigation::Render { route: Route::OwnerVenues, query: None }
    );
    Ok(())
}

#[tokio::test]
async fn rejected_persisted_credential_is_cleared_silently() -> Result<()> {
    let api = common::FakeApi::start().await?;
    let (gateway, store) = api.client(Some("revoked"));

    let session = SessionStore::new(gateway);
    assert_eq!(session.status(), SessionStatus::Booting);
    assert_eq!(session.bootstrap().await, SessionStatus::Anonymous);
    assert_eq!(store.load()?, None);
    Ok(())
}

#[tokio::test]
async fn member_login_does_not_open_owner_routes() -> Result<()> {
    let api = common::FakeApi::start().await?;
    let (gateway, _) = api.client(None);
    let session = SessionStore::start(gateway).await;

    assert_eq!(
        navigate(&session.snapshot(), "/owner/venues"),
        Navigation::Redirect { from: Route::OwnerVenues, to: Route::Login }
    );

    session.login("a@b.com", "secret").await?;
    assert_eq!(
        navigate(&session.snapshot(), "/owner/venues"),
        Navigation::Redirect { from: Route::OwnerVenues, to: Route::Home }
    );
    Ok(())
}
