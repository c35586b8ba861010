//! Music, video, and location side lookups.
//!
//! These are single request/response queries triggered by the user outside
//! the turn-append flow. Each returns at most one display string; the
//! `Lookups` facade maps both empty results and collaborator errors to the
//! `"not found"` sentinel.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::AiError;

/// Sentinel shown when a lookup has no answer.
pub const NOT_FOUND: &str = "not found";

/// A search collaborator returning at most one display string.
#[async_trait]
pub trait MediaSearch: Send + Sync {
    /// `Ok(None)` means the query matched nothing.
    async fn search(&self, query: &str) -> Result<Option<String>, AiError>;
}

const MUSIC_API_URL: &str = "https://itunes.apple.com/search";
const VIDEO_API_URL: &str = "https://www.googleapis.com/youtube/v3/search";
const PLACE_API_URL: &str = "https://nominatim.openstreetmap.org/search";

fn lookup_http() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(std::time::Duration::from_secs(10))
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .expect("failed to build HTTP client")
}

async fn get_json(request: reqwest::RequestBuilder) -> Result<serde_json::Value, AiError> {
    let response = request
        .send()
        .await
        .map_err(|e| AiError::Upstream(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AiError::Upstream(format!("HTTP {status}")));
    }

    response
        .json()
        .await
        .map_err(|e| AiError::Parse(e.to_string()))
}

/// Track lookup against the iTunes search API.
pub struct MusicSearchClient {
    http: reqwest::Client,
}

impl MusicSearchClient {
    pub fn new() -> Self {
        Self {
            http: lookup_http(),
        }
    }
}

impl Default for MusicSearchClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaSearch for MusicSearchClient {
    async fn search(&self, query: &str) -> Result<Option<String>, AiError> {
        debug!(query, "music search");
        let json = get_json(self.http.get(MUSIC_API_URL).query(&[
            ("term", query),
            ("media", "music"),
            ("limit", "1"),
        ]))
        .await?;

        Ok(json["results"][0]["trackViewUrl"]
            .as_str()
            .map(String::from))
    }
}

/// Video lookup against the YouTube search API.
pub struct VideoSearchClient {
    api_key: String,
    http: reqwest::Client,
}

impl std::fmt::Debug for VideoSearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoSearchClient")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl VideoSearchClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            http: lookup_http(),
        }
    }
}

#[async_trait]
impl MediaSearch for VideoSearchClient {
    async fn search(&self, query: &str) -> Result<Option<String>, AiError> {
        debug!(query, "video search");
        let json = get_json(self.http.get(VIDEO_API_URL).query(&[
            ("part", "snippet"),
            ("type", "video"),
            ("maxResults", "1"),
            ("q", query),
            ("key", self.api_key.as_str()),
        ]))
        .await?;

        Ok(json["items"][0]["id"]["videoId"]
            .as_str()
            .map(|id| format!("https://www.youtube.com/watch?v={id}")))
    }
}

/// Location lookup against the Nominatim geocoder.
pub struct PlaceSearchClient {
    http: reqwest::Client,
}

impl PlaceSearchClient {
    pub fn new() -> Self {
        Self {
            http: lookup_http(),
        }
    }
}

impl Default for PlaceSearchClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaSearch for PlaceSearchClient {
    async fn search(&self, query: &str) -> Result<Option<String>, AiError> {
        debug!(query, "place search");
        let json = get_json(
            self.http
                .get(PLACE_API_URL)
                // Nominatim requires an identifying User-Agent.
                .header("User-Agent", concat!("parley/", env!("CARGO_PKG_VERSION")))
                .query(&[("q", query), ("format", "json"), ("limit", "1")]),
        )
        .await?;

        Ok(json[0]["display_name"].as_str().map(String::from))
    }
}

/// Facade over the configured lookup collaborators.
///
/// Applies the error-as-not-found policy: a failed or unconfigured lookup
/// degrades to [`NOT_FOUND`] instead of surfacing an error.
#[derive(Default)]
pub struct Lookups {
    music: Option<Arc<dyn MediaSearch>>,
    video: Option<Arc<dyn MediaSearch>>,
    place: Option<Arc<dyn MediaSearch>>,
}

impl Lookups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_music(mut self, client: Arc<dyn MediaSearch>) -> Self {
        self.music = Some(client);
        self
    }

    pub fn with_video(mut self, client: Arc<dyn MediaSearch>) -> Self {
        self.video = Some(client);
        self
    }

    pub fn with_place(mut self, client: Arc<dyn MediaSearch>) -> Self {
        self.place = Some(client);
        self
    }

    pub async fn music(&self, query: &str) -> String {
        Self::run(self.music.as_deref(), query).await
    }

    pub async fn video(&self, query: &str) -> String {
        Self::run(self.video.as_deref(), query).await
    }

    pub async fn place(&self, query: &str) -> String {
        Self::run(self.place.as_deref(), query).await
    }

    async fn run(client: Option<&dyn MediaSearch>, query: &str) -> String {
        let Some(client) = client else {
            return NOT_FOUND.to_string();
        };
        match client.search(query).await {
            Ok(Some(result)) if !result.is_empty() => result,
            Ok(_) => NOT_FOUND.to_string(),
            Err(e) => {
                warn!("lookup failed: {e}");
                NOT_FOUND.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSearch(Option<String>);

    #[async_trait]
    impl MediaSearch for FixedSearch {
        async fn search(&self, _query: &str) -> Result<Option<String>, AiError> {
            Ok(self.0.clone())
        }
    }

    struct BrokenSearch;

    #[async_trait]
    impl MediaSearch for BrokenSearch {
        async fn search(&self, _query: &str) -> Result<Option<String>, AiError> {
            Err(AiError::Upstream("HTTP 503".into()))
        }
    }

    #[tokio::test]
    async fn hit_returns_the_display_string() {
        let lookups = Lookups::new()
            .with_music(Arc::new(FixedSearch(Some("https://example.com/track".into()))));
        assert_eq!(lookups.music("bohemian rhapsody").await, "https://example.com/track");
    }

    #[tokio::test]
    async fn empty_result_maps_to_not_found() {
        let lookups = Lookups::new().with_video(Arc::new(FixedSearch(None)));
        assert_eq!(lookups.video("anything").await, NOT_FOUND);
    }

    #[tokio::test]
    async fn collaborator_error_maps_to_not_found() {
        let lookups = Lookups::new().with_place(Arc::new(BrokenSearch));
        assert_eq!(lookups.place("nowhere").await, NOT_FOUND);
    }

    #[tokio::test]
    async fn unconfigured_lookup_maps_to_not_found() {
        let lookups = Lookups::new();
        assert_eq!(lookups.music("anything").await, NOT_FOUND);
        assert_eq!(lookups.video("anything").await, NOT_FOUND);
        assert_eq!(lookups.place("anything").await, NOT_FOUND);
    }
}
