use tuna_parse::{artwork, split_time_info};

use super::{non_empty, Adapter};
use crate::page::{Page, SessionState};
use crate::track::{NextTrack, PlaybackStatus, Source, TrackState};

const TITLE: &str = ".ytmusic-player-bar.title";
const TIME_INFO: &str = ".ytmusic-player-bar.time-info";

/// Artist link candidates, tried in order; the byline markup differs
/// depending on how many artists are credited.
const ARTIST_SELECTORS: &[&str] = &[
    r#".ytmusic-player-bar.byline [href*="channel/"]:not([href*="channel/MPREb_"])"#,
    r#".ytmusic-player-bar.byline .yt-formatted-string:nth-child(2n+1):not([href*="browse/"])"#,
];

const ALBUM_SELECTORS: &[&str] = &[r#".ytmusic-player-bar [href*="browse/MPREb_"]"#];

const QUEUE_ITEM: &str = "ytmusic-player-queue-item";
const QUEUE_TITLE: &str = ".song-title";
const QUEUE_BYLINE: &str = ".byline";
const QUEUE_IMAGE: &str = "yt-img-shadow img";

/// YouTube Music. Play state comes straight from the media session.
#[derive(Debug, Default)]
pub struct YouTubeMusicAdapter;

impl Adapter for YouTubeMusicAdapter {
    fn source(&self) -> Source {
        Source::YouTubeMusic
    }

    fn capture(&mut self, page: &dyn Page, _now_ms: u64) -> Option<TrackState> {
        let session = page.media_session();
        let meta = session.metadata?;

        let status = if session.playback_state == SessionState::Playing {
            PlaybackStatus::Playing
        } else {
            PlaybackStatus::Stopped
        };

        let (progress, duration) = page
            .query(TIME_INFO)
            .map(|e| split_time_info(e.trimmed_text()))
            .unwrap_or((0, 0));

        let title = page
            .query(TITLE)
            .and_then(|e| e.non_empty_attr("title"))
            .unwrap_or_default();

        let artists = ARTIST_SELECTORS
            .iter()
            .map(|s| page.query_all(s))
            .find(|found| !found.is_empty())
            .unwrap_or_default()
            .into_iter()
            .filter_map(|e| non_empty(&e.text))
            .collect();

        let album = page.first_of(ALBUM_SELECTORS).and_then(|e| non_empty(&e.text));

        Some(TrackState {
            title,
            artists,
            album,
            cover: meta.last_artwork().map(str::to_string),
            status,
            progress,
            duration,
            next_track: read_next_track(page),
            ..TrackState::new(Source::YouTubeMusic)
        })
    }
}

/// The first on-screen queue entry is the upcoming track.
fn read_next_track(page: &dyn Page) -> Option<NextTrack> {
    let title = page
        .query_in(QUEUE_ITEM, QUEUE_TITLE)
        .and_then(|e| non_empty(&e.text))?;
    let artist = page
        .query_in(QUEUE_ITEM, QUEUE_BYLINE)
        .and_then(|e| non_empty(&e.text))
        .unwrap_or_default();
    let cover = page
        .query_in(QUEUE_ITEM, QUEUE_IMAGE)
        .and_then(|img| img.non_empty_attr("src"))
        .map(|url| artwork::youtube_music_queue_cover(&url));

    Some(NextTrack { title, artist, cover })
}
