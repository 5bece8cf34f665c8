use serde::{Deserialize, Serialize};
use tuna_detect::TrackState;

/// Wire body posted to the local listener.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub data: TrackState,
    pub hostname: String,
    /// Capture time, milliseconds since the Unix epoch.
    pub date: u64,
}

/// Outbound transport for envelopes.
///
/// Sending is fire-and-forget: implementations must return immediately and
/// deal with (log) their own failures. Nothing is retried or queued.
pub trait Sink {
    fn send(&self, envelope: Envelope);
}

impl<S: Sink + ?Sized> Sink for &S {
    fn send(&self, envelope: Envelope) {
        (**self).send(envelope)
    }
}
