use tuna_parse::artwork;

use super::{non_empty, Adapter};
use crate::page::Page;
use crate::track::{PlaybackStatus, Source, TrackState};

/// Only rendered while a track is playing.
const PAUSE_BUTTON: &str = r#"[data-testid="play_button_pause"]"#;
const SLIDER: &str = "input.slider-track-input.mousetrap";

#[derive(Debug, Default)]
pub struct DeezerAdapter;

impl Adapter for DeezerAdapter {
    fn source(&self) -> Source {
        Source::Deezer
    }

    fn capture(&mut self, page: &dyn Page, _now_ms: u64) -> Option<TrackState> {
        let meta = page.media_session().metadata?;

        let status = if page.query(PAUSE_BUTTON).is_some() {
            PlaybackStatus::Playing
        } else {
            PlaybackStatus::Stopped
        };

        // Deezer reports all credited artists as one comma-separated field.
        let artists = meta
            .artist()
            .map(|a| a.split(',').filter_map(non_empty).collect())
            .unwrap_or_default();

        let (progress, duration) = match page.query(SLIDER) {
            Some(slider) => (
                slider.number_value().map(rounded_ms).unwrap_or(0),
                slider.number_attr("max").map(rounded_ms).unwrap_or(0),
            ),
            None => (0, 0),
        };

        Some(TrackState {
            title: meta.title().unwrap_or_default().to_string(),
            artists,
            album: meta.album().map(str::to_string),
            cover: meta.first_artwork().map(artwork::deezer_cover),
            status,
            progress,
            duration,
            ..TrackState::new(Source::Deezer)
        })
    }
}

fn rounded_ms(seconds: f64) -> u64 {
    if seconds > 0.0 {
        (seconds * 1000.0).round() as u64
    } else {
        0
    }
}
