use tuna_detect::TrackState;

/// Duplicate suppression in front of the transport.
///
/// Playing states always pass, so every progress update goes out. A
/// non-playing state passes only when it differs from the last state that
/// was actually sent, which announces each transition once instead of
/// repeating an unchanged paused snapshot every tick.
#[derive(Debug, Default)]
pub struct ChangeGate {
    last_sent: Option<TrackState>,
}

impl ChangeGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether `state` should be sent, remembering it if so.
    pub fn admit(&mut self, state: &TrackState) -> bool {
        if !state.is_playing() && self.last_sent.as_ref() == Some(state) {
            return false;
        }
        self.last_sent = Some(state.clone());
        true
    }

    pub fn last_sent(&self) -> Option<&TrackState> {
        self.last_sent.as_ref()
    }
}
