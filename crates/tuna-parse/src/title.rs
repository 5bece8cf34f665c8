use std::sync::LazyLock;

use regex::Regex;

static RE_OFFICIAL_PAREN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\(Official.*?\)").unwrap());

static RE_OFFICIAL_BRACKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[Official.*?\]").unwrap());

/// Remove the first `"<artist> - "` and then the first `" - <artist>"` from a title.
pub fn strip_artist(title: &str, artist: &str) -> String {
    if artist.is_empty() {
        return title.to_string();
    }
    let title = title.replacen(&format!("{artist} - "), "", 1);
    title.replacen(&format!(" - {artist}"), "", 1)
}

/// Drop `(Official ...)` and `[Official ...]` qualifiers, case-insensitively.
pub fn strip_official_tags(title: &str) -> String {
    let title = RE_OFFICIAL_PAREN.replace_all(title, "");
    let title = RE_OFFICIAL_BRACKET.replace_all(&title, "");
    title.trim().to_string()
}

/// Clean a video page title into a track title.
///
/// The artist prefix/suffix is removed only when the artist is known.
pub fn clean_video_title(title: &str, artist: Option<&str>) -> String {
    let title = match artist {
        Some(artist) => strip_artist(title, artist),
        None => title.to_string(),
    };
    strip_official_tags(&title)
}
