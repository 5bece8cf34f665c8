//! Human-readable summary of a captured state for the debug overlay.

use tuna_detect::{PlaybackStatus, TrackState};
use tuna_parse::format_timecode;

/// One line per overlay row: source, title, artists, timing, status and,
/// when known, the upcoming track.
pub fn status_lines(state: &TrackState) -> Vec<String> {
    let mut lines = vec![format!("TUNA ({})", state.source.display_name())];

    lines.push(if state.title.is_empty() {
        "No title".to_string()
    } else {
        state.title.clone()
    });

    if !state.artists.is_empty() {
        lines.push(state.artists.join(", "));
    }

    lines.push(format!(
        "{} / {}",
        format_timecode(state.progress),
        format_timecode(state.duration)
    ));

    lines.push(
        match state.status {
            PlaybackStatus::Playing => "▶ PLAYING",
            PlaybackStatus::Stopped => "⏸ STOPPED",
        }
        .to_string(),
    );

    if let Some(next) = &state.next_track {
        if next.artist.is_empty() {
            lines.push(format!("Next: {}", next.title));
        } else {
            lines.push(format!("Next: {} - {}", next.artist, next.title));
        }
    }

    lines
}

/// The overlay rows joined for a single log line.
pub fn status_line(state: &TrackState) -> String {
    status_lines(state).join(" | ")
}
