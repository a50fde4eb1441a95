#![allow(dead_code)]

use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use axum::{
    Form, Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
};
use chrono::{Duration, Utc};
use playcli::{config::Settings, types::Token};
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub const GOOD_CODE: &str = "good-code";
pub const COVER_BYTES: &[u8] = b"\x89PNG fake cover";

/// A request seen by the mock Spotify server.
#[derive(Debug, Clone)]
pub struct Call {
    pub path: String,
    pub authorization: Option<String>,
    pub params: HashMap<String, String>,
    pub body: String,
}

type Calls = Arc<Mutex<Vec<Call>>>;

#[derive(Clone)]
struct MockState {
    calls: Calls,
    fail_play: Arc<AtomicBool>,
}

/// In-process stand-in for accounts.spotify.com and api.spotify.com.
pub struct MockSpotify {
    pub base: String,
    calls: Calls,
    fail_play: Arc<AtomicBool>,
}

impl MockSpotify {
    pub async fn start() -> Self {
        let calls: Calls = Arc::new(Mutex::new(Vec::new()));
        let fail_play = Arc::new(AtomicBool::new(false));
        let app = Router::new()
            .route("/api/token", post(token))
            .route("/v1/search", get(search))
            .route("/v1/me/player/play", put(play))
            .route("/v1/me/player/devices", get(devices))
            .route("/v1/me/player", put(transfer))
            .route("/art/cover.png", get(cover))
            .with_state(MockState {
                calls: Arc::clone(&calls),
                fail_play: Arc::clone(&fail_play),
            });

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockSpotify {
            base: format!("http://{}", addr),
            calls,
            fail_play,
        }
    }

    /// Makes play requests that carry track URIs answer 404 (no active
    /// device). Body-less resume requests still succeed.
    pub fn fail_play_requests(&self) {
        self.fail_play.store(true, Ordering::SeqCst);
    }

    pub fn settings(&self, token_path: PathBuf) -> Settings {
        Settings::for_base_url(&self.base, token_path)
    }

    pub fn calls_to(&self, path: &str) -> Vec<Call> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.path == path)
            .cloned()
            .collect()
    }
}

pub fn valid_token() -> Token {
    Token {
        access_token: "access-1".to_string(),
        token_type: "Bearer".to_string(),
        refresh_token: "refresh-1".to_string(),
        expiry: Utc::now() + Duration::hours(1),
    }
}

pub fn expired_token() -> Token {
    Token {
        expiry: Utc::now() - Duration::minutes(5),
        ..valid_token()
    }
}

fn record(calls: &Calls, path: &str, headers: &HeaderMap, params: HashMap<String, String>, body: String) {
    calls.lock().unwrap().push(Call {
        path: path.to_string(),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        params,
        body,
    });
}

async fn token(
    State(MockState { calls, .. }): State<MockState>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    record(&calls, "/api/token", &headers, form.clone(), String::new());

    match form.get("grant_type").map(String::as_str) {
        Some("authorization_code") if form.get("code").map(String::as_str) == Some(GOOD_CODE) => (
            StatusCode::OK,
            Json(json!({
                "access_token": "access-1",
                "token_type": "Bearer",
                "scope": "user-read-private",
                "expires_in": 3600,
                "refresh_token": "refresh-1"
            })),
        ),
        Some("refresh_token") => (
            StatusCode::OK,
            Json(json!({
                "access_token": "access-2",
                "token_type": "Bearer",
                "scope": "user-read-private",
                "expires_in": 3600
            })),
        ),
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_grant" })),
        ),
    }
}

fn track(id: &str, name: &str, artist: &str, album: &str, images: Value) -> Value {
    json!({
        "id": id,
        "name": name,
        "uri": format!("spotify:track:{}", id),
        "artists": [{ "id": format!("{}-artist", id), "name": artist }],
        "album": { "name": album, "images": images }
    })
}

async fn search(
    State(MockState { calls, .. }): State<MockState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let query = params.get("q").cloned().unwrap_or_default();
    let host = headers
        .get("host")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost")
        .to_string();
    let cover = format!("http://{}/art/cover.png", host);
    record(&calls, "/v1/search", &headers, params, String::new());

    if query == "nothing" {
        return Json(json!({ "tracks": { "items": [], "total": 0 } }));
    }

    Json(json!({
        "tracks": {
            "items": [
                track("t1", "Yesterday", "The Beatles", "Help!", json!([
                    { "url": "http://img/640", "height": 640, "width": 640 },
                    { "url": cover, "height": 300, "width": 300 }
                ])),
                track("t2", "Yesterday - Live", "The Beatles", "Live at the BBC", json!([])),
                track("t3", "Yesterday (Cover)", "Someone Else", "Covers", json!([
                    { "url": "http://img/only", "height": 640, "width": 640 }
                ]))
            ],
            "total": 3
        }
    }))
}

async fn play(State(state): State<MockState>, headers: HeaderMap, body: String) -> StatusCode {
    let fail = state.fail_play.load(Ordering::SeqCst) && !body.is_empty();
    record(&state.calls, "/v1/me/player/play", &headers, HashMap::new(), body);
    if fail {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

async fn devices(State(MockState { calls, .. }): State<MockState>, headers: HeaderMap) -> Json<Value> {
    record(&calls, "/v1/me/player/devices", &headers, HashMap::new(), String::new());
    Json(json!({
        "devices": [
            { "id": "dev-laptop", "name": "Laptop", "is_active": true, "type": "Computer", "volume_percent": 50 },
            { "id": "dev-kitchen", "name": "Kitchen", "is_active": false, "type": "Speaker", "volume_percent": 30 },
            { "id": null, "name": "Restricted TV", "is_active": false, "type": "TV", "volume_percent": null }
        ]
    }))
}

async fn transfer(State(MockState { calls, .. }): State<MockState>, headers: HeaderMap, body: String) -> StatusCode {
    record(&calls, "/v1/me/player", &headers, HashMap::new(), body);
    StatusCode::NO_CONTENT
}

async fn cover() -> &'static [u8] {
    COVER_BYTES
}
