use chrono::Duration;
use reqwest::{Client, RequestBuilder, Response};

use crate::{
    Res,
    config::Settings,
    management::TokenStore,
    spotify::auth,
    types::{
        Device, DevicesResponse, PlayRequest, SearchKind, SearchResponse, Token, Track,
        TransferPlaybackRequest,
    },
};

/// Seconds before expiry at which the token is refreshed.
const EXPIRY_LEEWAY_SECS: i64 = 60;

/// Authenticated handle for the Spotify Web API.
///
/// Holds the current token and refreshes it transparently when it is about
/// to expire; refreshed tokens are written back to the [`TokenStore`].
pub struct Session {
    http: Client,
    settings: Settings,
    store: TokenStore,
    token: Token,
}

impl Session {
    pub fn new(settings: Settings, store: TokenStore, token: Token) -> Self {
        Session {
            http: Client::new(),
            settings,
            store,
            token,
        }
    }

    /// Loads the persisted token and wraps it in a session.
    pub async fn restore(settings: Settings) -> Res<Self> {
        let store = TokenStore::new(&settings.token_path);
        let token = store.load().await?;
        Ok(Session::new(settings, store, token))
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Searches the catalog. Results keep Spotify's relevance order.
    pub async fn search(&mut self, query: &str, kind: SearchKind, limit: u32) -> Res<Vec<Track>> {
        let limit = limit.to_string();
        let req = self
            .http
            .get(self.url("/search"))
            .query(&[("q", query), ("type", kind.as_str()), ("limit", limit.as_str())]);

        let res: SearchResponse = self.send(req).await?.json().await?;
        Ok(res.tracks.map(|page| page.items).unwrap_or_default())
    }

    /// Starts playback of `uris` on the active device.
    pub async fn play(&mut self, uris: &[String]) -> Res<()> {
        let body = PlayRequest {
            uris: uris.to_vec(),
        };
        let req = self.http.put(self.url("/me/player/play")).json(&body);
        self.send(req).await?;
        Ok(())
    }

    /// Resumes playback of whatever the active device has queued.
    pub async fn resume(&mut self) -> Res<()> {
        let req = self
            .http
            .put(self.url("/me/player/play"))
            .header(reqwest::header::CONTENT_LENGTH, 0);
        self.send(req).await?;
        Ok(())
    }

    /// Devices currently available to the user, in Spotify's order.
    pub async fn devices(&mut self) -> Res<Vec<Device>> {
        let req = self.http.get(self.url("/me/player/devices"));
        let res: DevicesResponse = self.send(req).await?.json().await?;
        Ok(res.devices)
    }

    /// Moves playback to `device_id`; `force_play` starts playing there.
    pub async fn transfer_playback(&mut self, device_id: &str, force_play: bool) -> Res<()> {
        let body = TransferPlaybackRequest {
            device_ids: vec![device_id.to_string()],
            play: force_play,
        };
        let req = self.http.put(self.url("/me/player")).json(&body);
        self.send(req).await?;
        Ok(())
    }

    /// Downloads an image (album art is served without authentication).
    pub async fn fetch_image(&self, url: &str) -> Res<Vec<u8>> {
        let res = self.http.get(url).send().await?.error_for_status()?;
        Ok(res.bytes().await?.to_vec())
    }

    async fn send(&mut self, req: RequestBuilder) -> Res<Response> {
        self.ensure_fresh().await?;
        let res = req.bearer_auth(&self.token.access_token).send().await?;
        tracing::debug!(url = %res.url(), status = %res.status(), "spotify api call");
        Ok(res.error_for_status()?)
    }

    async fn ensure_fresh(&mut self) -> Res<()> {
        if !self.token.is_expired(Duration::seconds(EXPIRY_LEEWAY_SECS)) || !self.token.can_refresh()
        {
            return Ok(());
        }

        let refreshed =
            auth::refresh_token(&self.http, &self.settings, &self.token.refresh_token).await?;
        self.store.save(&refreshed).await?;
        self.token = refreshed;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.api_url.trim_end_matches('/'), path)
    }
}
