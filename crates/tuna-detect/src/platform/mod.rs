//! Per-service extraction of a [`TrackState`] from a [`Page`].
//!
//! Every adapter is a fixed, hand-written mapping of one service's markup.
//! A missing element never fails a capture: the field degrades to empty, or
//! the whole tick is skipped when the service's minimum signal is absent.

pub mod deezer;
pub mod soundcloud;
pub mod spotify;
pub mod yandex;
pub mod youtube;
pub mod youtube_music;

use crate::page::Page;
use crate::track::{Source, TrackState};

pub use deezer::DeezerAdapter;
pub use soundcloud::SoundCloudAdapter;
pub use spotify::SpotifyAdapter;
pub use yandex::{PlayInference, YandexAdapter};
pub use youtube::YouTubeAdapter;
pub use youtube_music::YouTubeMusicAdapter;

/// Extraction logic for one streaming service.
pub trait Adapter: Send {
    fn source(&self) -> Source;

    /// Read the page and build a track state, or `None` to skip this tick.
    ///
    /// `now_ms` is a wall-clock timestamp in milliseconds; only adapters that
    /// infer state over time look at it.
    fn capture(&mut self, page: &dyn Page, now_ms: u64) -> Option<TrackState>;
}

/// Trimmed text, `None` when blank.
pub(crate) fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
