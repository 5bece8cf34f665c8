use tuna_parse::parse_timecode;

use super::Adapter;
use crate::page::Page;
use crate::track::{PlaybackStatus, Source, TrackState};

const PLAY_PAUSE: &str = r#"[data-testid="control-button-playpause"]"#;
const POSITION: &str = r#"[data-testid="playback-position"]"#;
const DURATION: &str = r#"[data-testid="playback-duration"]"#;

/// Spotify Web Player.
///
/// The play/pause button's label names the action it would take, so a
/// "Pause" label means the track is playing.
#[derive(Debug, Default)]
pub struct SpotifyAdapter;

impl Adapter for SpotifyAdapter {
    fn source(&self) -> Source {
        Source::Spotify
    }

    fn capture(&mut self, page: &dyn Page, _now_ms: u64) -> Option<TrackState> {
        let meta = page.media_session().metadata?;

        let status = match page.query(PLAY_PAUSE).and_then(|b| b.non_empty_attr("aria-label")) {
            Some(label) if label.to_lowercase().contains("pause") => PlaybackStatus::Playing,
            _ => PlaybackStatus::Stopped,
        };

        let timecode = |selector: &str| {
            page.query(selector)
                .map(|e| parse_timecode(&e.text))
                .unwrap_or(0)
        };

        Some(TrackState {
            title: meta.title().unwrap_or_default().to_string(),
            artists: meta.artist().map(str::to_string).into_iter().collect(),
            album: meta.album().map(str::to_string),
            cover: meta.first_artwork().map(str::to_string),
            status,
            progress: timecode(POSITION),
            duration: timecode(DURATION),
            ..TrackState::new(Source::Spotify)
        })
    }
}
