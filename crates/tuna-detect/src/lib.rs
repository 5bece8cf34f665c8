pub mod page;
pub mod platform;
pub mod registry;
pub mod snapshot;
pub mod track;

pub use page::{Artwork, Element, MediaElement, MediaMetadata, MediaSession, Page, SessionState};
pub use platform::Adapter;
pub use registry::{OriginRule, Registry};
pub use snapshot::{PageSnapshot, RecordedElement, SnapshotError};
pub use track::{NextTrack, PlaybackStatus, Source, TrackState};
