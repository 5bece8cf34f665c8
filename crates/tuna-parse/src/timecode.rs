/// Convert a `M:SS` or `H:MM:SS` timestamp into milliseconds.
///
/// Anything else (empty input, a single number, four segments, a segment
/// that is not an unsigned integer) yields `0`. Missing timing data must
/// degrade to a zero position rather than fail a tick.
pub fn parse_timecode(input: &str) -> u64 {
    let input = input.trim();
    if input.is_empty() {
        return 0;
    }

    let mut parts = Vec::with_capacity(3);
    for segment in input.split(':') {
        match segment.trim().parse::<u64>() {
            Ok(n) => parts.push(n),
            Err(_) => return 0,
        }
    }

    let seconds = match parts.as_slice() {
        [m, s] => m.checked_mul(60).and_then(|m| m.checked_add(*s)),
        [h, m, s] => h
            .checked_mul(3600)
            .and_then(|h| h.checked_add(m.checked_mul(60)?))
            .and_then(|hm| hm.checked_add(*s)),
        _ => None,
    };
    seconds.and_then(|s| s.checked_mul(1000)).unwrap_or(0)
}

/// Parse a combined `"<position> / <duration>"` label into `(progress, duration)`.
pub fn split_time_info(input: &str) -> (u64, u64) {
    let mut halves = input.split(" / ");
    let progress = halves.next().map(parse_timecode).unwrap_or(0);
    let duration = halves.next().map(parse_timecode).unwrap_or(0);
    (progress, duration)
}

/// Render milliseconds as `M:SS`, or `H:MM:SS` once past the hour.
pub fn format_timecode(ms: u64) -> String {
    let total = ms / 1000;
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}
