pub mod config;
pub mod error;
pub mod http_sink;
pub mod listener;
pub mod runner;

pub use config::AppConfig;
pub use error::TunaError;
pub use http_sink::HttpSink;
pub use listener::{NowPlaying, NowPlayingStore, TrackUpdate};
pub use runner::{now_ms, run, run_with, PageSource, SnapshotFile};
