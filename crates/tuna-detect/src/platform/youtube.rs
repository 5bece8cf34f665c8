//! YouTube watch pages (not YouTube Music).

use tuna_parse::{artwork, clean_video_title};

use super::{non_empty, Adapter};
use crate::page::Page;
use crate::track::{NextTrack, PlaybackStatus, Source, TrackState};

/// Channel name locations, most specific first.
const ARTIST_SELECTORS: &[&str] = &[
    "#text > a",
    "#owner #channel-name a",
    "ytd-video-owner-renderer #channel-name a",
];

/// Video title locations, most specific first.
const TITLE_SELECTORS: &[&str] = &[
    "#container > h1 > yt-formatted-string",
    "h1.ytd-video-primary-info-renderer",
    "ytd-watch-metadata h1 yt-formatted-string",
];

const NEXT_BUTTON: &str = "a.ytp-next-button[data-preview]";

#[derive(Debug, Default)]
pub struct YouTubeAdapter;

impl Adapter for YouTubeAdapter {
    fn source(&self) -> Source {
        Source::YouTube
    }

    fn capture(&mut self, page: &dyn Page, _now_ms: u64) -> Option<TrackState> {
        let video = page.media_element()?;

        // A halted video clears the display downstream rather than
        // leaving the last frame's metadata up.
        if video.paused {
            return Some(TrackState::reset(Source::YouTube));
        }

        let mut artists: Vec<String> = page
            .first_of(ARTIST_SELECTORS)
            .and_then(|e| non_empty(&e.text))
            .into_iter()
            .collect();

        let mut title = page
            .first_of(TITLE_SELECTORS)
            .and_then(|e| non_empty(&e.text))
            .unwrap_or_default();

        if title.is_empty() {
            if let Some(meta) = page.media_session().metadata {
                title = meta.title().unwrap_or_default().to_string();
                if artists.is_empty() {
                    artists.extend(meta.artist().map(str::to_string));
                }
            }
        }

        let title = clean_video_title(&title, artists.first().map(String::as_str));
        let video_id = artwork::youtube_video_id(&page.href());

        Some(TrackState {
            title,
            artists,
            cover: video_id.as_deref().map(artwork::youtube_thumbnail),
            status: PlaybackStatus::Playing,
            progress: video.progress_ms(),
            duration: video.duration_ms(),
            next_track: read_next_track(page),
            video_id,
            ..TrackState::new(Source::YouTube)
        })
    }
}

/// The player's "next" button carries the upcoming video's title and thumbnail.
fn read_next_track(page: &dyn Page) -> Option<NextTrack> {
    let button = page.query(NEXT_BUTTON)?;
    let title = button.non_empty_attr("data-tooltip-text")?;
    let cover = button
        .non_empty_attr("data-preview")
        .map(|url| artwork::youtube_preview(&url));

    Some(NextTrack {
        title,
        artist: String::new(),
        cover,
    })
}
