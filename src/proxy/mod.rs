// Passthrough to the public Deezer catalog for the music player.
// Bodies come back exactly as Deezer sent them; we only validate
// parameters and translate failures into a uniform error body.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub const DEEZER_API: &str = "https://api.deezer.com";

const DEFAULT_LIMIT: u32 = 25;
const MAX_SEARCH_LIMIT: u32 = 50;
const MAX_CHART_LIMIT: u32 = 100;

/// What a search looks for. Unrecognised values fall back to tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    #[default]
    Track,
    Artist,
    Album,
}

impl SearchKind {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("artist") => SearchKind::Artist,
            Some("album") => SearchKind::Album,
            _ => SearchKind::Track,
        }
    }

    fn path(&self) -> &'static str {
        match self {
            SearchKind::Track => "track",
            SearchKind::Artist => "artist",
            SearchKind::Album => "album",
        }
    }
}

#[derive(Debug, Error)]
pub enum ProxyError {
    /// A required query parameter was absent or blank (HTTP 400)
    #[error("{0}")]
    MissingParameter(&'static str),
    /// Deezer could not be reached or answered with a failure (HTTP 500)
    #[error("{context}: {message}")]
    Upstream {
        context: &'static str,
        message: String,
    },
}

impl ProxyError {
    pub fn status(&self) -> u16 {
        match self {
            ProxyError::MissingParameter(_) => 400,
            ProxyError::Upstream { .. } => 500,
        }
    }

    fn upstream(context: &'static str, err: impl std::fmt::Display) -> Self {
        ProxyError::Upstream {
            context,
            message: err.to_string(),
        }
    }
}

// The frontend receives `{ error, message }`, same as an HTTP error body
impl Serialize for ProxyError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ProxyError::MissingParameter(error) => {
                let mut body = serializer.serialize_struct("ProxyError", 2)?;
                body.serialize_field("status", &self.status())?;
                body.serialize_field("error", error)?;
                body.end()
            }
            ProxyError::Upstream { context, message } => {
                let mut body = serializer.serialize_struct("ProxyError", 3)?;
                body.serialize_field("status", &self.status())?;
                body.serialize_field("error", context)?;
                body.serialize_field("message", message)?;
                body.end()
            }
        }
    }
}

/// Parse a `limit` query value from its leading digits ("10abc" is 10).
/// Missing, non-numeric, zero or negative values become the default;
/// the result is capped at `max`.
pub fn clamp_limit(raw: Option<&str>, max: u32) -> u32 {
    raw.and_then(leading_integer)
        .filter(|value| *value > 0)
        .map_or(DEFAULT_LIMIT, |value| value.min(u64::from(max)) as u32)
}

fn leading_integer(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..end];
    if digits.is_empty() {
        return None;
    }
    // Too many digits to fit is still "very large"
    Some(digits.parse().unwrap_or(u64::MAX))
}

fn required<'a>(value: Option<&'a str>, missing: &'static str) -> Result<&'a str, ProxyError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ProxyError::MissingParameter(missing)),
    }
}

pub struct DeezerClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for DeezerClient {
    fn default() -> Self {
        Self::new(DEEZER_API)
    }
}

impl DeezerClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn search_url(
        &self,
        query: &str,
        kind: SearchKind,
        limit: u32,
    ) -> Result<reqwest::Url, ProxyError> {
        let mut url = self.endpoint(
            &format!("search/{}", kind.path()),
            "Failed to fetch from Deezer API",
        )?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("limit", &limit.to_string());
        Ok(url)
    }

    pub fn chart_url(&self, limit: u32) -> Result<reqwest::Url, ProxyError> {
        let mut url = self.endpoint("chart/0/tracks", "Failed to fetch charts from Deezer API")?;
        url.query_pairs_mut().append_pair("limit", &limit.to_string());
        Ok(url)
    }

    pub fn track_url(&self, id: &str) -> Result<reqwest::Url, ProxyError> {
        // Ids are path segments; keep them from escaping the /track/ prefix
        let mut url = self.endpoint("track", "Failed to fetch track from Deezer API")?;
        url.path_segments_mut()
            .map_err(|_| {
                ProxyError::upstream("Failed to fetch track from Deezer API", "invalid base url")
            })?
            .push(id);
        Ok(url)
    }

    fn endpoint(&self, path: &str, context: &'static str) -> Result<reqwest::Url, ProxyError> {
        reqwest::Url::parse(&format!("{}/{}", self.base_url, path))
            .map_err(|e| ProxyError::upstream(context, e))
    }

    /// Search tracks, artists or albums
    pub async fn search(
        &self,
        query: Option<&str>,
        kind: Option<&str>,
        limit: Option<&str>,
    ) -> Result<Value, ProxyError> {
        let query = required(query, "Missing search query parameter \"q\"")?;
        let url = self.search_url(
            query,
            SearchKind::parse(kind),
            clamp_limit(limit, MAX_SEARCH_LIMIT),
        )?;
        self.fetch(url, "Failed to fetch from Deezer API").await
    }

    /// Current chart tracks
    pub async fn trending(&self, limit: Option<&str>) -> Result<Value, ProxyError> {
        let url = self.chart_url(clamp_limit(limit, MAX_CHART_LIMIT))?;
        self.fetch(url, "Failed to fetch charts from Deezer API").await
    }

    /// One track by Deezer id
    pub async fn track(&self, id: Option<&str>) -> Result<Value, ProxyError> {
        let id = required(id, "Missing track ID parameter")?;
        let url = self.track_url(id)?;
        self.fetch(url, "Failed to fetch track from Deezer API").await
    }

    async fn fetch(&self, url: reqwest::Url, context: &'static str) -> Result<Value, ProxyError> {
        debug!(%url, "deezer request");

        let response = self.http.get(url).send().await.map_err(|e| {
            warn!(error = %e, "deezer proxy error");
            ProxyError::upstream(context, e)
        })?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(%status, "deezer proxy error");
            return Err(ProxyError::upstream(
                context,
                format!("Deezer API error: {}", status.as_u16()),
            ));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ProxyError::upstream(context, e))
    }
}

// ===== Tauri commands =====

#[cfg_attr(feature = "desktop", tauri::command)]
pub async fn music_search(
    q: Option<String>,
    search_type: Option<String>,
    limit: Option<String>,
) -> Result<Value, ProxyError> {
    DeezerClient::default()
        .search(q.as_deref(), search_type.as_deref(), limit.as_deref())
        .await
}

#[cfg_attr(feature = "desktop", tauri::command)]
pub async fn music_trending(limit: Option<String>) -> Result<Value, ProxyError> {
    DeezerClient::default().trending(limit.as_deref()).await
}

#[cfg_attr(feature = "desktop", tauri::command)]
pub async fn music_track(id: Option<String>) -> Result<Value, ProxyError> {
    DeezerClient::default().track(id.as_deref()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_limit_parsing() {
        assert_eq!(clamp_limit(None, MAX_SEARCH_LIMIT), 25);
        assert_eq!(clamp_limit(Some("10"), MAX_SEARCH_LIMIT), 10);
        assert_eq!(clamp_limit(Some("500"), MAX_SEARCH_LIMIT), 50);
        assert_eq!(clamp_limit(Some("500"), MAX_CHART_LIMIT), 100);
        assert_eq!(clamp_limit(Some("abc"), MAX_SEARCH_LIMIT), 25);
        assert_eq!(clamp_limit(Some("0"), MAX_SEARCH_LIMIT), 25);
        assert_eq!(clamp_limit(Some("-4"), MAX_SEARCH_LIMIT), 25);
    }

    #[test]
    fn test_limit_uses_leading_digits() {
        assert_eq!(clamp_limit(Some("10abc"), MAX_SEARCH_LIMIT), 10);
        assert_eq!(clamp_limit(Some(" 7 "), MAX_SEARCH_LIMIT), 7);
        assert_eq!(clamp_limit(Some("+12"), MAX_SEARCH_LIMIT), 12);
        assert_eq!(clamp_limit(Some("30.9"), MAX_CHART_LIMIT), 30);
        assert_eq!(clamp_limit(Some("99999999999999999999999"), MAX_CHART_LIMIT), 100);
        assert_eq!(clamp_limit(Some("x10"), MAX_SEARCH_LIMIT), 25);
    }

    #[test]
    fn test_search_kind_fallback() {
        assert_eq!(SearchKind::parse(Some("artist")), SearchKind::Artist);
        assert_eq!(SearchKind::parse(Some("album")), SearchKind::Album);
        assert_eq!(SearchKind::parse(Some("playlist")), SearchKind::Track);
        assert_eq!(SearchKind::parse(None), SearchKind::Track);
    }

    #[test]
    fn test_urls() {
        let client = DeezerClient::new("https://api.deezer.com/");

        let url = client.search_url("daft punk", SearchKind::Artist, 10).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.deezer.com/search/artist?q=daft+punk&limit=10"
        );

        let url = client.chart_url(25).unwrap();
        assert_eq!(url.as_str(), "https://api.deezer.com/chart/0/tracks?limit=25");

        let url = client.track_url("3135556").unwrap();
        assert_eq!(url.as_str(), "https://api.deezer.com/track/3135556");

        // Slashes in an id stay inside the segment
        let url = client.track_url("../user/1").unwrap();
        assert!(url.path().starts_with("/track/"));
        assert_eq!(url.path_segments().unwrap().count(), 2);
    }

    #[tokio::test]
    async fn test_missing_parameters_rejected_before_request() {
        // Unroutable base: reaching the network would fail differently
        let client = DeezerClient::new("http://127.0.0.1:9");

        let err = client.search(None, None, None).await.unwrap_err();
        assert_eq!(err.status(), 400);
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({ "status": 400, "error": "Missing search query parameter \"q\"" })
        );

        let err = client.search(Some("   "), None, None).await.unwrap_err();
        assert_eq!(err.status(), 400);

        let err = client.track(None).await.unwrap_err();
        assert_eq!(err.to_string(), "Missing track ID parameter");
    }

    #[test]
    fn test_upstream_error_body() {
        let err = ProxyError::upstream(
            "Failed to fetch charts from Deezer API",
            "Deezer API error: 503",
        );
        assert_eq!(err.status(), 500);
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({
                "status": 500,
                "error": "Failed to fetch charts from Deezer API",
                "message": "Deezer API error: 503"
            })
        );
    }
}
