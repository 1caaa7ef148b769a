use serde::Deserialize;
use thiserror::Error;

use crate::song::Song;

const BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
const MUSIC_CATEGORY: &str = "10";
const MAX_RESULTS: &str = "15";

/// The only API failure that reaches the UI is the missing credential;
/// transport and parse trouble is logged and collapses to empty results.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(
        "YouTube API key is missing. Add youtube_api_key to config.toml \
         or set YOUTUBE_API_KEY to enable search and trending."
    )]
    MissingCredential,
    #[error("YouTube request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchResult>,
}

#[derive(Deserialize)]
struct SearchResult {
    id: VideoRef,
    snippet: Snippet,
}

/// Search answers can include channels and playlists; only entries with a
/// video id become songs.
#[derive(Deserialize)]
struct VideoRef {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoResult>,
}

#[derive(Deserialize)]
struct VideoResult {
    id: String,
    snippet: Snippet,
}

#[derive(Deserialize)]
struct Snippet {
    title: String,
    #[serde(rename = "channelTitle")]
    channel_title: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Deserialize, Default)]
struct Thumbnails {
    high: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Deserialize)]
struct Thumbnail {
    url: String,
}

fn song_from_snippet(video_id: String, snippet: Snippet) -> Song {
    let art = snippet
        .thumbnails
        .high
        .or(snippet.thumbnails.default)
        .map(|t| t.url);
    Song::remote(video_id, snippet.title, snippet.channel_title, art)
}

/// Thin client for the YouTube Data API v3.
#[derive(Clone)]
pub struct YoutubeClient {
    http: reqwest::Client,
    api_key: Option<String>,
}

impl YoutubeClient {
    pub fn new(http: reqwest::Client, api_key: Option<String>) -> Self {
        Self { http, api_key }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    fn key(&self) -> Result<&str, ApiError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ApiError::MissingCredential)
    }

    /// Music-category video search. Transport failures come back as an
    /// empty list after a log entry.
    pub async fn search(&self, query: &str) -> Result<Vec<Song>, ApiError> {
        let key = self.key()?;
        match self.fetch_search(query, key).await {
            Ok(songs) => Ok(songs),
            Err(e) => {
                tracing::error!("YouTube search for {query:?} failed: {e}");
                Ok(Vec::new())
            }
        }
    }

    /// Most-popular music videos for a region.
    pub async fn trending(&self, region: &str) -> Result<Vec<Song>, ApiError> {
        let key = self.key()?;
        match self.fetch_trending(region, key).await {
            Ok(songs) => Ok(songs),
            Err(e) => {
                tracing::error!("YouTube trending for {region} failed: {e}");
                Ok(Vec::new())
            }
        }
    }

    async fn fetch_search(&self, query: &str, key: &str) -> Result<Vec<Song>, reqwest::Error> {
        let response = self
            .http
            .get(format!("{BASE_URL}/search"))
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("videoCategoryId", MUSIC_CATEGORY),
                ("maxResults", MAX_RESULTS),
                ("q", query),
                ("key", key),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<SearchListResponse>()
            .await?;

        Ok(response
            .items
            .into_iter()
            .filter_map(|item| {
                let video_id = item.id.video_id?;
                Some(song_from_snippet(video_id, item.snippet))
            })
            .collect())
    }

    async fn fetch_trending(&self, region: &str, key: &str) -> Result<Vec<Song>, reqwest::Error> {
        let response = self
            .http
            .get(format!("{BASE_URL}/videos"))
            .query(&[
                ("part", "snippet"),
                ("chart", "mostPopular"),
                ("regionCode", region),
                ("videoCategoryId", MUSIC_CATEGORY),
                ("maxResults", MAX_RESULTS),
                ("key", key),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<VideoListResponse>()
            .await?;

        Ok(response
            .items
            .into_iter()
            .map(|item| song_from_snippet(item.id, item.snippet))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_search_without_credential_is_missing_credential() {
        let client = YoutubeClient::new(reqwest::Client::new(), None);
        let err = client.search("lofi").await.unwrap_err();
        assert!(matches!(err, ApiError::MissingCredential));
    }

    #[tokio::test]
    async fn test_empty_credential_counts_as_missing() {
        let client = YoutubeClient::new(reqwest::Client::new(), Some(String::new()));
        let err = client.trending("PK").await.unwrap_err();
        assert!(matches!(err, ApiError::MissingCredential));
        assert!(!client.has_credential());
    }
}
