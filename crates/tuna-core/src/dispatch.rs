use tracing::{debug, trace};
use tuna_detect::{Page, Registry, Source, TrackState};

use crate::gate::ChangeGate;
use crate::sink::{Envelope, Sink};

/// What one polling tick did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// No adapter handles the page's origin.
    NoAdapter,
    /// The adapter found too little on the page to build a state.
    Skipped(Source),
    /// A state was captured but the gate held it back.
    Suppressed(TrackState),
    /// A state was captured and handed to the sink.
    Sent(Envelope),
}

impl TickOutcome {
    /// The captured state, whether or not it was sent.
    pub fn state(&self) -> Option<&TrackState> {
        match self {
            Self::Suppressed(state) => Some(state),
            Self::Sent(envelope) => Some(&envelope.data),
            Self::NoAdapter | Self::Skipped(_) => None,
        }
    }
}

/// Runs the capture → gate → sink pipeline once per tick.
///
/// Owns every piece of state that survives between ticks: the adapters
/// (and with them any per-platform memory) and the gate's last sent state.
#[derive(Debug)]
pub struct Dispatcher<S> {
    registry: Registry,
    gate: ChangeGate,
    sink: S,
}

impl<S: Sink> Dispatcher<S> {
    pub fn new(registry: Registry, sink: S) -> Self {
        Self {
            registry,
            gate: ChangeGate::new(),
            sink,
        }
    }

    /// A dispatcher over every supported service.
    pub fn standard(sink: S) -> Self {
        Self::new(Registry::standard(), sink)
    }

    /// Process the page once. `now_ms` is epoch milliseconds and becomes the
    /// envelope's `date`.
    pub fn tick(&mut self, page: &dyn Page, now_ms: u64) -> TickOutcome {
        let hostname = page.hostname();
        let Some(adapter) = self.registry.select(&hostname) else {
            trace!(host = %hostname, "No adapter for origin");
            return TickOutcome::NoAdapter;
        };

        let source = adapter.source();
        let Some(state) = adapter.capture(page, now_ms) else {
            debug!(%source, "Nothing to capture this tick");
            return TickOutcome::Skipped(source);
        };

        if !self.gate.admit(&state) {
            trace!(%source, "Unchanged state suppressed");
            return TickOutcome::Suppressed(state);
        }

        debug!(
            %source,
            title = %state.title,
            status = ?state.status,
            progress = state.progress,
            "Sending track state"
        );
        let envelope = Envelope {
            data: state,
            hostname,
            date: now_ms,
        };
        self.sink.send(envelope.clone());
        TickOutcome::Sent(envelope)
    }

    pub fn gate(&self) -> &ChangeGate {
        &self.gate
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use tuna_detect::{
        Element, MediaElement, MediaMetadata, MediaSession, PageSnapshot, PlaybackStatus,
        SessionState,
    };

    #[derive(Default)]
    struct RecordingSink {
        sent: RefCell<Vec<Envelope>>,
    }

    impl Sink for RecordingSink {
        fn send(&self, envelope: Envelope) {
            self.sent.borrow_mut().push(envelope);
        }
    }

    fn music_page(state: SessionState, time: &str) -> PageSnapshot {
        PageSnapshot::new("https://music.youtube.com/watch?v=abcdefghijk")
            .with_session(MediaSession {
                playback_state: state,
                metadata: Some(MediaMetadata {
                    title: Some("Song".into()),
                    ..Default::default()
                }),
            })
            .with(
                ".ytmusic-player-bar.title",
                Element::default().with_attr("title", "Song"),
            )
            .with(".ytmusic-player-bar.time-info", Element::with_text(time))
    }

    fn video_page(url: &str) -> PageSnapshot {
        PageSnapshot::new(url).with_media(MediaElement {
            paused: false,
            current_time: 1.0,
            duration: 10.0,
        })
    }

    #[test]
    fn test_unknown_origin_is_noop() {
        let sink = RecordingSink::default();
        let mut dispatcher = Dispatcher::standard(&sink);
        let outcome = dispatcher.tick(&PageSnapshot::new("https://example.org/"), 0);
        assert_eq!(outcome, TickOutcome::NoAdapter);
        assert!(sink.sent.borrow().is_empty());
    }

    #[test]
    fn test_skipped_tick_sends_nothing() {
        let sink = RecordingSink::default();
        let mut dispatcher = Dispatcher::standard(&sink);
        let outcome = dispatcher.tick(&PageSnapshot::new("https://open.spotify.com/"), 0);
        assert_eq!(outcome, TickOutcome::Skipped(Source::Spotify));
        assert!(sink.sent.borrow().is_empty());
    }

    #[test]
    fn test_envelope_carries_origin_and_time() {
        let sink = RecordingSink::default();
        let mut dispatcher = Dispatcher::standard(&sink);
        dispatcher.tick(&music_page(SessionState::Playing, "0:01 / 3:00"), 1_234);

        let sent = sink.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].hostname, "music.youtube.com");
        assert_eq!(sent[0].date, 1_234);
        assert_eq!(sent[0].data.source, Source::YouTubeMusic);
    }

    #[test]
    fn test_music_subdomain_uses_music_adapter() {
        let sink = RecordingSink::default();
        let mut dispatcher = Dispatcher::standard(&sink);

        // A music page with a <video> element would also satisfy the video
        // adapter; it must still be handled as YouTube Music.
        let page = music_page(SessionState::Playing, "0:01 / 3:00").with_media(MediaElement {
            paused: false,
            current_time: 1.0,
            duration: 180.0,
        });
        let outcome = dispatcher.tick(&page, 0);
        assert_eq!(outcome.state().unwrap().source, Source::YouTubeMusic);

        let outcome = dispatcher.tick(&video_page("https://www.youtube.com/watch?v=abcdefghijk"), 0);
        assert_eq!(outcome.state().unwrap().source, Source::YouTube);
    }

    #[test]
    fn test_paused_snapshot_sent_once() {
        let sink = RecordingSink::default();
        let mut dispatcher = Dispatcher::standard(&sink);

        let ticks = [
            music_page(SessionState::Playing, "0:01 / 3:00"),
            music_page(SessionState::Playing, "0:02 / 3:00"),
            music_page(SessionState::Paused, "0:02 / 3:00"),
            music_page(SessionState::Paused, "0:02 / 3:00"),
            music_page(SessionState::Playing, "0:03 / 3:00"),
        ];
        let outcomes: Vec<TickOutcome> = ticks
            .iter()
            .enumerate()
            .map(|(i, page)| dispatcher.tick(page, i as u64 * 500))
            .collect();

        assert!(matches!(outcomes[3], TickOutcome::Suppressed(_)));
        let sent = sink.sent.borrow();
        assert_eq!(sent.len(), 4);
        let statuses: Vec<PlaybackStatus> = sent.iter().map(|e| e.data.status).collect();
        assert_eq!(
            statuses,
            [
                PlaybackStatus::Playing,
                PlaybackStatus::Playing,
                PlaybackStatus::Stopped,
                PlaybackStatus::Playing
            ]
        );
        assert_eq!(dispatcher.gate().last_sent().unwrap().progress, 3_000);
    }

    #[test]
    fn test_youtube_pause_resets_once() {
        let sink = RecordingSink::default();
        let mut dispatcher = Dispatcher::standard(&sink);
        let url = "https://www.youtube.com/watch?v=abcdefghijk";

        dispatcher.tick(&video_page(url), 0);
        let paused = PageSnapshot::new(url).with_media(MediaElement {
            paused: true,
            current_time: 5.0,
            duration: 10.0,
        });
        dispatcher.tick(&paused, 500);
        dispatcher.tick(&paused, 1_000);

        let sent = sink.sent.borrow();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].data, TrackState::reset(Source::YouTube));
    }

    #[test]
    fn test_yandex_memory_lives_in_dispatcher() {
        let sink = RecordingSink::default();
        let mut dispatcher = Dispatcher::standard(&sink);
        let page = PageSnapshot::new("https://music.yandex.ru/")
            .with(r#"span[class*="Timecode_root_start"]"#, Element::with_text("0:05"))
            .with(r#"span[class*="Timecode_root_end"]"#, Element::with_text("3:00"));

        let statuses: Vec<PlaybackStatus> = [0, 500, 1_000, 1_500, 2_000]
            .iter()
            .map(|&t| dispatcher.tick(&page, t).state().unwrap().status)
            .collect();
        assert_eq!(
            statuses,
            [
                PlaybackStatus::Playing,
                PlaybackStatus::Playing,
                PlaybackStatus::Playing,
                PlaybackStatus::Stopped,
                PlaybackStatus::Stopped
            ]
        );
        // Playing ticks always go out; the stopped state goes out once.
        assert_eq!(sink.sent.borrow().len(), 4);
    }
}
