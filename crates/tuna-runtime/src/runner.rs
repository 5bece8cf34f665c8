//! Fixed-period polling loop.

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use tuna_core::{Dispatcher, Sink, TickOutcome};
use tuna_detect::{Page, PageSnapshot};

/// Wall-clock epoch milliseconds, the timestamp every tick runs under.
pub fn now_ms() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}

/// Supplies the page to inspect on each tick.
pub trait PageSource {
    type Page: Page;

    /// `None` makes the tick a no-op.
    fn fetch(&mut self) -> Option<Self::Page>;
}

/// A recorded page re-read from disk on every tick, so edits to the file
/// show up while the loop runs.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PageSource for SnapshotFile {
    type Page = PageSnapshot;

    fn fetch(&mut self) -> Option<PageSnapshot> {
        match PageSnapshot::load(&self.path) {
            Ok(page) => Some(page),
            Err(e) => {
                debug!(path = %self.path.display(), "Snapshot unreadable: {e}");
                None
            }
        }
    }
}

/// Poll `source` every `period` until `shutdown` resolves.
pub async fn run<P, S, F>(source: P, dispatcher: &mut Dispatcher<S>, period: Duration, shutdown: F)
where
    P: PageSource,
    S: Sink,
    F: Future<Output = ()>,
{
    run_with(source, dispatcher, period, shutdown, |_| {}).await
}

/// [`run`], handing every tick's outcome to `observe`.
///
/// Ticks never overlap: a tick that overruns its period delays the next one
/// and missed ticks are skipped rather than replayed in a burst.
pub async fn run_with<P, S, F, O>(
    mut source: P,
    dispatcher: &mut Dispatcher<S>,
    period: Duration,
    shutdown: F,
    mut observe: O,
) where
    P: PageSource,
    S: Sink,
    F: Future<Output = ()>,
    O: FnMut(&TickOutcome),
{
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tokio::pin!(shutdown);

    info!(period_ms = period.as_millis() as u64, "Polling started");
    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => break,
            _ = ticker.tick() => {
                if let Some(page) = source.fetch() {
                    let outcome = dispatcher.tick(&page, now_ms());
                    observe(&outcome);
                }
            }
        }
    }
    info!("Polling stopped");
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use tuna_core::Envelope;
    use tuna_detect::{Element, Source};

    #[derive(Default)]
    struct RecordingSink {
        sent: RefCell<Vec<Envelope>>,
    }

    impl Sink for RecordingSink {
        fn send(&self, envelope: Envelope) {
            self.sent.borrow_mut().push(envelope);
        }
    }

    struct Fixed {
        page: PageSnapshot,
        fetches: usize,
    }

    impl PageSource for &mut Fixed {
        type Page = PageSnapshot;

        fn fetch(&mut self) -> Option<PageSnapshot> {
            self.fetches += 1;
            Some(self.page.clone())
        }
    }

    fn soundcloud_page(playing: bool) -> PageSnapshot {
        let control = if playing {
            Element::default().with_attr("class", "playControl playing")
        } else {
            Element::default().with_attr("class", "playControl")
        };
        PageSnapshot::new("https://soundcloud.com/someone/track")
            .with(
                ".playbackSoundBadge__titleLink",
                Element::default().with_attr("title", "Track"),
            )
            .with(".playControl", control)
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_until_shutdown() {
        let mut source = Fixed {
            page: PageSnapshot::new("https://example.org/"),
            fetches: 0,
        };
        let mut dispatcher = Dispatcher::standard(RecordingSink::default());

        let shutdown = tokio::time::sleep(Duration::from_millis(1_250));
        run(&mut source, &mut dispatcher, Duration::from_millis(500), shutdown).await;

        // Immediate first tick, then at 500 and 1000 ms.
        assert_eq!(source.fetches, 3);
        assert!(dispatcher.sink().sent.borrow().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_state_sent_once() {
        let mut source = Fixed {
            page: soundcloud_page(false),
            fetches: 0,
        };
        let mut dispatcher = Dispatcher::standard(RecordingSink::default());
        let mut outcomes = Vec::new();

        let shutdown = tokio::time::sleep(Duration::from_millis(1_750));
        run_with(
            &mut source,
            &mut dispatcher,
            Duration::from_millis(500),
            shutdown,
            |outcome| outcomes.push(outcome.clone()),
        )
        .await;

        assert_eq!(outcomes.len(), 4);
        assert!(matches!(outcomes[0], TickOutcome::Sent(_)));
        assert!(outcomes[1..]
            .iter()
            .all(|o| matches!(o, TickOutcome::Suppressed(_))));
        let sent = dispatcher.sink().sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].data.source, Source::SoundCloud);
    }

    #[tokio::test(start_paused = true)]
    async fn test_playing_state_sent_every_tick() {
        let mut source = Fixed {
            page: soundcloud_page(true),
            fetches: 0,
        };
        let mut dispatcher = Dispatcher::standard(RecordingSink::default());

        let shutdown = tokio::time::sleep(Duration::from_millis(1_250));
        run(&mut source, &mut dispatcher, Duration::from_millis(500), shutdown).await;

        assert_eq!(dispatcher.sink().sent.borrow().len(), 3);
    }

    #[test]
    fn test_snapshot_file_reread_each_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.json");
        let mut source = SnapshotFile::new(&path);

        assert!(source.fetch().is_none());

        std::fs::write(&path, r#"{"url": "https://open.spotify.com/"}"#).unwrap();
        assert_eq!(source.fetch().unwrap().hostname(), "open.spotify.com");

        std::fs::write(&path, r#"{"url": "https://www.deezer.com/"}"#).unwrap();
        assert_eq!(source.fetch().unwrap().hostname(), "www.deezer.com");

        std::fs::write(&path, "not json").unwrap();
        assert!(source.fetch().is_none());
    }
}
