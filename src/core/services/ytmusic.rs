use reqwest;
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing::debug;

use super::nav;
use crate::error::{BridgeError, Result, UpstreamError};

/// Lyrics browse ids carry this prefix; anything else is a plain video id.
pub const LYRICS_ID_PREFIX: &str = "MPLY";

const CLIENT_NAME: &str = "WEB_REMIX";
const CLIENT_VERSION: &str = "1.20240101.01.00";

// Search filter parameters follow the upstream scheme: a common prefix, a
// per-filter code, and a suffix selecting whether spelling auto-correction
// is applied.
const SEARCH_PARAM_PREFIX: &str = "EgWKAQ";
const SEARCH_PARAM_SUFFIX: &str = "AWoMEA4QChADEAQQCRAF";
const SEARCH_PARAM_SUFFIX_IGNORE_SPELLING: &str = "AWoQEA4QChADEAQQCRAFEBEQFQ%3D%3D";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFilter {
    Songs,
    Albums,
    Artists,
    Videos,
}

impl SearchFilter {
    pub fn result_type(self) -> &'static str {
        match self {
            SearchFilter::Songs => "song",
            SearchFilter::Albums => "album",
            SearchFilter::Artists => "artist",
            SearchFilter::Videos => "video",
        }
    }

    fn param_code(self) -> &'static str {
        match self {
            SearchFilter::Songs => "II",
            SearchFilter::Albums => "IY",
            SearchFilter::Artists => "Ig",
            SearchFilter::Videos => "IQ",
        }
    }
}

fn search_params(filter: SearchFilter, ignore_spelling: bool) -> String {
    let suffix = if ignore_spelling {
        SEARCH_PARAM_SUFFIX_IGNORE_SPELLING
    } else {
        SEARCH_PARAM_SUFFIX
    };
    format!("{}{}{}", SEARCH_PARAM_PREFIX, filter.param_code(), suffix)
}

fn playlist_browse_id(playlist_id: &str) -> String {
    // browse wants the VL-prefixed form of a playlist id
    if playlist_id.starts_with("VL") {
        playlist_id.to_string()
    } else {
        format!("VL{playlist_id}")
    }
}

/// A track's immediate play context: the queue around it plus the lyrics
/// browse id, when the service has lyrics for it.
pub struct WatchPlaylist {
    pub tracks: Vec<Value>,
    pub lyrics_id: Option<String>,
}

/// Anonymous client for the YouTube Music internal API. One instance is
/// built per invocation and passed into the command that needs it.
#[derive(Clone)]
pub struct YtMusicClient {
    client: reqwest::Client,
    base_url: String,
    language: String,
}

impl YtMusicClient {
    pub fn new(base_url: &str, language: &str, timeout_seconds: u64) -> Self {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("ytmbridge v{} (https://github.com/musicdock/ytmbridge-cli)", version);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(user_agent)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            language: language.to_string(),
        }
    }

    fn request_body(&self, payload: Value) -> Value {
        let mut body = json!({
            "context": {
                "client": {
                    "clientName": CLIENT_NAME,
                    "clientVersion": CLIENT_VERSION,
                    "hl": self.language,
                }
            }
        });
        if let (Value::Object(body_map), Value::Object(payload)) = (&mut body, payload) {
            body_map.extend(payload);
        }
        body
    }

    async fn post(&self, endpoint: &str, payload: Value) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .query(&[("prettyPrint", "false")])
            .json(&self.request_body(payload))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                endpoint: endpoint.to_string(),
                status,
            }
            .into());
        }

        Ok(response.json().await?)
    }

    /// Runs one filtered search. The service has no per-request count
    /// parameter, so `limit` truncates the parsed shelf client-side.
    pub async fn search(
        &self,
        query: &str,
        filter: SearchFilter,
        limit: Option<usize>,
        ignore_spelling: bool,
    ) -> Result<Vec<Value>> {
        let payload = json!({
            "query": query,
            "params": search_params(filter, ignore_spelling),
        });
        let response = self.post("search", payload).await?;

        let mut results: Vec<Value> = nav::search_shelf_items(&response)
            .into_iter()
            .filter_map(|item| nav::shape_search_result(item, filter.result_type()))
            .collect();
        if let Some(limit) = limit {
            results.truncate(limit);
        }
        debug!("{} search returned {} result(s)", filter.result_type(), results.len());
        Ok(results)
    }

    pub async fn get_song(&self, video_id: &str) -> Result<Value> {
        let response = self.post("player", json!({ "videoId": video_id })).await?;
        if response.get("videoDetails").is_none() {
            return Err(UpstreamError::NotFound {
                id: video_id.to_string(),
            }
            .into());
        }

        // The player response carries far more than callers need; keep the
        // same sections the upstream client library keeps.
        let mut record = Map::new();
        for key in ["videoDetails", "playabilityStatus", "streamingData", "microformat"] {
            if let Some(section) = response.get(key) {
                record.insert(key.to_string(), section.clone());
            }
        }
        Ok(Value::Object(record))
    }

    pub async fn get_watch_playlist(&self, video_id: &str) -> Result<WatchPlaylist> {
        let payload = json!({
            "videoId": video_id,
            "enablePersistentPlaylistPanel": true,
            "isAudioOnly": true,
            "tunerSettingValue": "AUTOMIX_SETTING_NORMAL",
        });
        let response = self.post("next", payload).await?;

        let tracks = nav::watch_playlist_tracks(&response);
        if tracks.is_empty() {
            return Err(UpstreamError::InvalidResponse {
                reason: format!("watch playlist for {video_id} has no tracks"),
            }
            .into());
        }

        Ok(WatchPlaylist {
            tracks,
            lyrics_id: nav::watch_playlist_lyrics_id(&response),
        })
    }

    pub async fn get_lyrics(&self, lyrics_id: &str) -> Result<String> {
        let response = self.post("browse", json!({ "browseId": lyrics_id })).await?;
        match nav::lyrics_text(&response) {
            Some(text) => Ok(text),
            None => Err(BridgeError::from(UpstreamError::NotFound {
                id: lyrics_id.to_string(),
            })),
        }
    }

    pub async fn get_album(&self, browse_id: &str) -> Result<Value> {
        self.browse_record(browse_id).await
    }

    pub async fn get_artist(&self, channel_id: &str) -> Result<Value> {
        self.browse_record(channel_id).await
    }

    pub async fn get_playlist(&self, playlist_id: &str) -> Result<Value> {
        self.browse_record(&playlist_browse_id(playlist_id)).await
    }

    async fn browse_record(&self, browse_id: &str) -> Result<Value> {
        let response = self.post("browse", json!({ "browseId": browse_id })).await?;
        match nav::shape_browse_record(&response, browse_id) {
            Some(record) => Ok(record),
            None => Err(BridgeError::from(UpstreamError::NotFound {
                id: browse_id.to_string(),
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_params_per_filter() {
        assert_eq!(
            search_params(SearchFilter::Songs, false),
            "EgWKAQIIAWoMEA4QChADEAQQCRAF"
        );
        assert_eq!(
            search_params(SearchFilter::Albums, false),
            "EgWKAQIYAWoMEA4QChADEAQQCRAF"
        );
        assert!(search_params(SearchFilter::Artists, true).starts_with("EgWKAQIg"));
        assert!(search_params(SearchFilter::Videos, true).ends_with(SEARCH_PARAM_SUFFIX_IGNORE_SPELLING));
    }

    #[test]
    fn test_result_types() {
        assert_eq!(SearchFilter::Songs.result_type(), "song");
        assert_eq!(SearchFilter::Videos.result_type(), "video");
    }

    #[test]
    fn test_playlist_browse_id_prefixing() {
        assert_eq!(playlist_browse_id("PL123"), "VLPL123");
        assert_eq!(playlist_browse_id("VLPL123"), "VLPL123");
    }
}
