//! Receiving side of the report wire format: the now-playing record a local
//! listener keeps and serves back.

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::info;

use tuna_detect::NextTrack;

use crate::error::TunaError;

/// What the listener currently believes is playing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NowPlaying {
    pub status: String,
    pub title: String,
    pub artists: Vec<String>,
    pub album: String,
    pub cover: String,
    pub cover_url: String,
    pub progress: u64,
    pub duration: u64,
    pub progress_percent: f64,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_track: Option<NextTrack>,
}

impl Default for NowPlaying {
    fn default() -> Self {
        Self {
            status: "stopped".into(),
            title: String::new(),
            artists: Vec::new(),
            album: String::new(),
            cover: String::new(),
            cover_url: String::new(),
            progress: 0,
            duration: 0,
            progress_percent: 0.0,
            source: String::new(),
            next_track: None,
        }
    }
}

/// One incoming report. Every field is optional; reporters other than ours
/// may send partial records or `null`s.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrackUpdate {
    pub status: Option<String>,
    pub title: Option<String>,
    pub artists: Option<Vec<String>>,
    pub album: Option<String>,
    pub cover: Option<String>,
    pub cover_url: Option<String>,
    #[serde(deserialize_with = "lenient_ms")]
    pub progress: Option<u64>,
    #[serde(deserialize_with = "lenient_ms")]
    pub duration: Option<u64>,
    pub source: Option<String>,
    pub next_track: Option<NextTrack>,
}

/// Millisecond counts may arrive fractional (`video.duration * 1000`) or
/// negative; floor them and clamp at zero.
fn lenient_ms<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.map(|ms| {
        if ms.is_finite() && ms > 0.0 {
            ms.floor() as u64
        } else {
            0
        }
    }))
}

impl TrackUpdate {
    /// Parse a request body that is either a full envelope (`{"data": …}`) or
    /// a bare track state.
    pub fn from_body(body: &[u8]) -> Result<Self, TunaError> {
        let raw: Value = serde_json::from_slice(body)?;
        let data = match raw {
            Value::Object(mut map) if map.get("data").is_some_and(Value::is_object) => {
                map.remove("data").unwrap_or_default()
            }
            other => other,
        };
        Ok(serde_json::from_value(data)?)
    }
}

impl NowPlaying {
    /// Replace the record with `update`. Missing fields reset to empty rather
    /// than keeping stale values.
    pub fn apply(&mut self, update: TrackUpdate) {
        let cover = update.cover.filter(|c| !c.is_empty());
        let cover_url = update.cover_url.filter(|c| !c.is_empty());

        self.status = update.status.unwrap_or_else(|| "playing".into());
        self.title = update.title.unwrap_or_default();
        self.artists = update.artists.unwrap_or_default();
        self.album = update.album.unwrap_or_default();
        self.cover = cover.clone().or_else(|| cover_url.clone()).unwrap_or_default();
        self.cover_url = cover_url.or(cover).unwrap_or_default();
        self.progress = update.progress.unwrap_or(0);
        self.duration = update.duration.unwrap_or(0);
        self.source = update.source.unwrap_or_default();
        self.next_track = update.next_track;

        self.progress_percent = if self.duration > 0 {
            self.progress as f64 / self.duration as f64 * 100.0
        } else {
            0.0
        };
    }
}

/// Shared now-playing record for the listener's handlers.
#[derive(Debug, Clone, Default)]
pub struct NowPlayingStore {
    inner: Arc<RwLock<NowPlaying>>,
}

impl NowPlayingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn current(&self) -> NowPlaying {
        self.inner.read().await.clone()
    }

    pub async fn apply(&self, update: TrackUpdate) -> NowPlaying {
        let mut current = self.inner.write().await;
        current.apply(update);
        info!("[{}] {} ({})", current.status, current.title, current.source);
        current.clone()
    }
}
