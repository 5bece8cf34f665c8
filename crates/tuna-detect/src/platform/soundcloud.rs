use tuna_parse::{artwork, parse_timecode};

use super::Adapter;
use crate::page::Page;
use crate::track::{PlaybackStatus, Source, TrackState};

const PLAY_CONTROL: &str = ".playControl";
const ARTWORK: &str = ".playbackSoundBadge span.sc-artwork";
const TITLE_LINK: &str = ".playbackSoundBadge__titleLink";
const ARTIST_LINK: &str = ".playbackSoundBadge__lightLink";
const TIME_PASSED: &str = ".playbackTimeline__timePassed span:nth-child(2)";
const TIME_TOTAL: &str = ".playbackTimeline__duration span:nth-child(2)";

/// SoundCloud. There is no media-session fallback here: without a title
/// in the sound badge the tick is skipped.
#[derive(Debug, Default)]
pub struct SoundCloudAdapter;

impl Adapter for SoundCloudAdapter {
    fn source(&self) -> Source {
        Source::SoundCloud
    }

    fn capture(&mut self, page: &dyn Page, _now_ms: u64) -> Option<TrackState> {
        let title = page.query(TITLE_LINK)?.non_empty_attr("title")?;

        let status = if page.query(PLAY_CONTROL).is_some_and(|e| e.has_class("playing")) {
            PlaybackStatus::Playing
        } else {
            PlaybackStatus::Stopped
        };

        // The badge artwork is only available as an inline background image.
        let cover = page
            .query(ARTWORK)
            .and_then(|e| e.style_property("background-image"))
            .map(|value| artwork::css_url(&value))
            .filter(|url| !url.is_empty() && url != "none")
            .map(|url| artwork::soundcloud_cover(&url));

        let artists = page
            .query(ARTIST_LINK)
            .and_then(|e| e.non_empty_attr("title"))
            .into_iter()
            .collect();

        let timecode = |selector: &str| {
            page.query(selector)
                .map(|e| parse_timecode(&e.text))
                .unwrap_or(0)
        };

        Some(TrackState {
            title,
            artists,
            cover,
            status,
            progress: timecode(TIME_PASSED),
            duration: timecode(TIME_TOTAL),
            ..TrackState::new(Source::SoundCloud)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Element;
    use crate::snapshot::PageSnapshot;

    fn badge_page(control_class: &str) -> PageSnapshot {
        PageSnapshot::new("https://soundcloud.com/discover")
            .with(PLAY_CONTROL, Element::default().with_attr("class", control_class))
            .with(
                ARTWORK,
                Element::default().with_attr(
                    "style",
                    r#"background-image: url("https://i1.sndcdn.com/artworks-000-t50x50.jpg"); width: 100%;"#,
                ),
            )
            .with(TITLE_LINK, Element::default().with_attr("title", "Mix 01"))
            .with(ARTIST_LINK, Element::default().with_attr("title", "DJ Someone"))
            .with(TIME_PASSED, Element::with_text("12:01"))
            .with(TIME_TOTAL, Element::with_text("1:00:00"))
    }

    #[test]
    fn test_capture_playing() {
        let state = SoundCloudAdapter
            .capture(&badge_page("playControl sc-ir playing"), 0)
            .unwrap();
        assert_eq!(state.status, PlaybackStatus::Playing);
        assert_eq!(state.title, "Mix 01");
        assert_eq!(state.artists, ["DJ Someone"]);
        assert_eq!(
            state.cover.as_deref(),
            Some("https://i1.sndcdn.com/artworks-000-t500x500.jpg")
        );
        assert_eq!(state.progress, 721_000);
        assert_eq!(state.duration, 3_600_000);
        assert!(state.album.is_none());
    }

    #[test]
    fn test_capture_paused() {
        let state = SoundCloudAdapter.capture(&badge_page("playControl sc-ir"), 0).unwrap();
        assert_eq!(state.status, PlaybackStatus::Stopped);
    }

    #[test]
    fn test_artwork_without_image() {
        for style in ["background-image: none;", "width: 100%;", r#"background-image: url("");"#] {
            let mut page = badge_page("playControl playing");
            page.elements.retain(|r| r.selector != ARTWORK);
            let page = page.with(ARTWORK, Element::default().with_attr("style", style));
            let state = SoundCloudAdapter.capture(&page, 0).unwrap();
            assert!(state.cover.is_none(), "style {style:?}");
        }
    }

    #[test]
    fn test_capture_is_idempotent() {
        let page = badge_page("playControl playing");
        let mut adapter = SoundCloudAdapter;
        assert_eq!(adapter.capture(&page, 0), adapter.capture(&page, 500));
    }

    #[test]
    fn test_skips_without_title() {
        let page = PageSnapshot::new("https://soundcloud.com/")
            .with(PLAY_CONTROL, Element::default().with_attr("class", "playControl playing"))
            .with(TITLE_LINK, Element::default().with_attr("title", ""));
        assert!(SoundCloudAdapter.capture(&page, 0).is_none());
    }
}
