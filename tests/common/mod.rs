#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use hallsbook::api::GatewayClient;
use hallsbook::storage::{CredentialStore, MemoryCredentialStore};

pub const MEMBER_TOKEN: &str = "t1";
pub const OWNER_TOKEN: &str = "owner-token";

/// What the fake API saw
#[derive(Debug, Default)]
pub struct Recorded {
    pub authorization: Vec<Option<String>>,
    pub search_queries: Vec<String>,
}

#[derive(Clone, Default)]
struct FakeState {
    recorded: Arc<Mutex<Recorded>>,
}

/// In-process stand-in for the remote venue-booking API
pub struct FakeApi {
    pub base_url: String,
    recorded: Arc<Mutex<Recorded>>,
}

impl FakeApi {
    pub async fn start() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let state = FakeState::default();
        let recorded = state.recorded.clone();
        let app = Router::new()
            .route("/health", get(health))
            .route("/auth/login", post(login))
            .route("/auth/me", get(me))
            .route("/venues/search", get(search))
            .route("/bookings", get(bookings).post(create_booking))
            .route("/bookings/:id", delete(cancel_booking))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind fake api")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self { base_url, recorded })
    }

    /// Gateway against this fake, with an in-memory credential store
    pub fn client(&self, credential: Option<&str>) -> (Arc<GatewayClient>, Arc<MemoryCredentialStore>) {
        let store = Arc::new(match credential {
            Some(token) => MemoryCredentialStore::with_credential(token),
            None => MemoryCredentialStore::new(),
        });
        let gateway = Arc::new(GatewayClient::new(self.base_url.clone(), store.clone() as Arc<dyn CredentialStore>));
        (gateway, store)
    }

    pub fn authorization_headers(&self) -> Vec<Option<String>> {
        self.recorded.lock().unwrap().authorization.clone()
    }

    pub fn search_queries(&self) -> Vec<String> {
        self.recorded.lock().unwrap().search_queries.clone()
    }
}

/// A base URL nothing listens on
pub fn unreachable_base_url() -> String {
    let port = portpicker::pick_unused_port().unwrap_or(9);
    format!("http://127.0.0.1:{}", port)
}

fn ok(data: Value) -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "ok": true, "data": data })))
}

fn err(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "ok": false, "error": message })))
}

fn profile(owner: bool) -> Value {
    let (id, email, name) = if owner {
        ("u-owner", "owner@halls.pk", "Ayesha Khan")
    } else {
        ("u1", "a@b.com", "")
    };
    json!({
        "id": id,
        "email": email,
        "full_name": name,
        "contact_number": "",
        "is_venue_owner": owner,
        "role": "user",
        "auth_provider": "password"
    })
}

fn record_auth(state: &FakeState, headers: &HeaderMap) -> Option<String> {
    let value = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.recorded.lock().unwrap().authorization.push(value.clone());
    value.and_then(|v| v.strip_prefix("Bearer ").map(str::to_string))
}

async fn health(State(state): State<FakeState>, headers: HeaderMap) -> impl IntoResponse {
    record_auth(&state, &headers);
    ok(json!({ "status": "ok" }))
}

async fn login(Json(body): Json<Value>) -> impl IntoResponse {
    match (body["email"].as_str(), body["password"].as_str()) {
        (Some("a@b.com"), Some("secret")) => ok(json!({ "token": MEMBER_TOKEN, "profile": profile(false) })),
        _ => err(StatusCode::UNAUTHORIZED, "Invalid email or password."),
    }
}

async fn me(State(state): State<FakeState>, headers: HeaderMap) -> impl IntoResponse {
    match record_auth(&state, &headers).as_deref() {
        Some(MEMBER_TOKEN) => ok(json!({ "profile": profile(false) })),
        Some(OWNER_TOKEN) => ok(json!({ "profile": profile(true) })),
        _ => err(StatusCode::UNAUTHORIZED, "Invalid or expired token."),
    }
}

async fn search(State(state): State<FakeState>, RawQuery(query): RawQuery) -> impl IntoResponse {
    let query = query.unwrap_or_default();
    state.recorded.lock().unwrap().search_queries.push(query.clone());

    if query.contains("capacity_min=100") {
        return ok(json!({ "venues": [] }));
    }
    ok(json!({
        "venues": [{
            "id": "v1",
            "venue_name": "Royal Palm Hall",
            "type": "Hall",
            "address": "Gulberg III, Lahore",
            "maps_location": { "type": "Point", "coordinates": [74.35, 31.52] },
            "capacity": 300,
            "dates_available": ["2024-05-01", "2024-05-02"],
            "pricing": { "overrides": [{ "date": "2024-05-01", "price": 50000 }] },
            "amenities": { "parking_valet": true, "air_conditioner": true },
            "pictures": ["https://img.example/royal-palm.jpg"]
        }]
    }))
}

async fn bookings(State(state): State<FakeState>, headers: HeaderMap) -> impl IntoResponse {
    if record_auth(&state, &headers).is_none() {
        return err(StatusCode::UNAUTHORIZED, "Missing bearer token.");
    }
    ok(json!({
        "bookings": [{
            "id": "b1",
            "venue_id": "v1",
            "user_id": "u1",
            "date": "2024-05-01",
            "guests": 150,
            "status": "pending",
            "price_locked": 50000
        }]
    }))
}

async fn create_booking(State(state): State<FakeState>, headers: HeaderMap) -> impl IntoResponse {
    record_auth(&state, &headers);
    err(StatusCode::CONFLICT, "Date already booked or pending.")
}

async fn cancel_booking(Path(_id): Path<String>) -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded")
}
