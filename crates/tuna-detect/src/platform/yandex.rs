//! Yandex Music.
//!
//! The player exposes no reliable play/pause indicator, so status is
//! inferred from whether the reported position keeps moving.

use tracing::debug;
use tuna_parse::{artwork, parse_timecode};

use super::Adapter;
use crate::page::Page;
use crate::track::{NextTrack, PlaybackStatus, Source, TrackState};

/// How long the position may stand still before playback counts as stopped.
pub const SILENCE_THRESHOLD_MS: u64 = 1200;

const SLIDER_SELECTORS: &[&str] = &[
    r#"input[type="range"][aria-label*="time code"]"#,
    r#"input[type="range"][class*="ChangeTimecode"]"#,
];
const TIMECODE_START: &str = r#"span[class*="Timecode_root_start"]"#;
const TIMECODE_END: &str = r#"span[class*="Timecode_root_end"]"#;
const LARGE_COVER_SELECTORS: &[&str] = &[
    r#"img[class*="FullscreenPlayer"][class*="cover"]"#,
    r#"img[class*="DesktopPoster_cover"]"#,
];
const QUEUE_BLOCK: &str = ".PlayQueueAfterPlayingBlock_root__A7_wI";
const QUEUE_TITLE: &str = r#"[class*="Meta_title"]"#;
const QUEUE_ARTIST: &str = r#"[class*="Meta_artistCaption"]"#;
const QUEUE_IMAGE: &str = "img";

/// Progress-watching play state detector.
#[derive(Debug, Clone, Default)]
pub struct PlayInference {
    last_progress: Option<u64>,
    last_change_ms: Option<u64>,
    status: PlaybackStatus,
}

impl PlayInference {
    /// Feed one progress observation and return the inferred status.
    ///
    /// A changed, nonzero position means playing and restarts the silence
    /// clock; more than [`SILENCE_THRESHOLD_MS`] without a change means
    /// stopped. In between, the previous status holds.
    pub fn observe(&mut self, progress: u64, now_ms: u64) -> PlaybackStatus {
        let last_change = *self.last_change_ms.get_or_insert(now_ms);

        if self.last_progress != Some(progress) && progress > 0 {
            self.last_change_ms = Some(now_ms);
            self.status = PlaybackStatus::Playing;
        } else if now_ms.saturating_sub(last_change) > SILENCE_THRESHOLD_MS {
            self.status = PlaybackStatus::Stopped;
        }
        self.last_progress = Some(progress);

        self.status
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }
}

#[derive(Debug, Default)]
pub struct YandexAdapter {
    inference: PlayInference,
}

impl YandexAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Adapter for YandexAdapter {
    fn source(&self) -> Source {
        Source::Yandex
    }

    fn capture(&mut self, page: &dyn Page, now_ms: u64) -> Option<TrackState> {
        let (progress, duration) = read_position(page);
        let status = self.inference.observe(progress, now_ms);

        let meta = page.media_session().metadata.unwrap_or_default();

        let cover = match page.first_of(LARGE_COVER_SELECTORS) {
            Some(img) => img.non_empty_attr("src"),
            None => meta.last_artwork().map(str::to_string),
        }
        .map(|url| artwork::yandex_cover(&url));

        let next_track = read_next_track(page);
        if let Some(next) = &next_track {
            debug!(title = %next.title, artist = %next.artist, "Yandex queue preview");
        }

        Some(TrackState {
            source: Source::Yandex,
            title: meta.title().unwrap_or("Unknown").to_string(),
            artists: meta.artist().map(str::to_string).into_iter().collect(),
            album: meta.album().map(str::to_string),
            cover,
            status,
            progress,
            duration,
            next_track,
            album_url: Some(page.href()),
            video_id: None,
        })
    }
}

/// The range slider is authoritative; the text timecodes are a fallback.
fn read_position(page: &dyn Page) -> (u64, u64) {
    if let Some(slider) = page.first_of(SLIDER_SELECTORS) {
        let progress = slider.number_value().map(whole_seconds_ms).unwrap_or(0);
        let duration = slider.number_attr("max").map(whole_seconds_ms).unwrap_or(0);
        return (progress, duration);
    }

    let progress = page
        .query(TIMECODE_START)
        .map(|e| parse_timecode(&e.text))
        .unwrap_or(0);
    let duration = page
        .query(TIMECODE_END)
        .map(|e| parse_timecode(&e.text))
        .unwrap_or(0);
    (progress, duration)
}

/// Slider values are seconds; fractions are dropped.
fn whole_seconds_ms(seconds: f64) -> u64 {
    if seconds > 0.0 {
        (seconds.trunc() as u64).saturating_mul(1000)
    } else {
        0
    }
}

fn read_next_track(page: &dyn Page) -> Option<NextTrack> {
    let title = page.query_in(QUEUE_BLOCK, QUEUE_TITLE)?;
    let artist = page.query_in(QUEUE_BLOCK, QUEUE_ARTIST)?;
    let cover = page
        .query_in(QUEUE_BLOCK, QUEUE_IMAGE)
        .and_then(|img| img.non_empty_attr("src"))
        .map(|url| artwork::yandex_queue_cover(&url));

    Some(NextTrack {
        title: title.trimmed_text().to_string(),
        artist: artist.trimmed_text().to_string(),
        cover,
    })
}
