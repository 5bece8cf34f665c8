//! Artwork URL handling.
//!
//! Every streaming service encodes the thumbnail size in the URL, so a
//! higher resolution variant is a string rewrite away.

use std::sync::LazyLock;

use regex::Regex;

static RE_SLASH_SIZE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/\d+x\d+").unwrap());

static RE_SIZE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+x\d+").unwrap());

static RE_YT_DEFAULT_THUMB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\w+default\.jpg.*").unwrap());

static RE_VIDEO_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*)").unwrap()
});

/// Yandex cover templates use `%%` for the size; also bump any `/NxM` segment.
pub fn yandex_cover(url: &str) -> String {
    let url = url.replacen("%%", "1000x1000", 1);
    RE_SLASH_SIZE.replace(&url, "/1000x1000").into_owned()
}

/// Small thumbnail for the Yandex queue preview.
pub fn yandex_queue_cover(url: &str) -> String {
    RE_SLASH_SIZE.replace(url, "/200x200").into_owned()
}

pub fn deezer_cover(url: &str) -> String {
    RE_SIZE.replace(url, "512x512").into_owned()
}

pub fn soundcloud_cover(url: &str) -> String {
    url.replacen("t50x50", "t500x500", 1)
}

/// Upgrade the "next" button preview from medium to high quality.
pub fn youtube_preview(url: &str) -> String {
    url.replacen("mqdefault", "hqdefault", 1)
}

/// Normalize any `/…default.jpg?...` YouTube Music thumbnail to `hqdefault.jpg`.
pub fn youtube_music_queue_cover(url: &str) -> String {
    RE_YT_DEFAULT_THUMB.replace(url, "/hqdefault.jpg").into_owned()
}

/// Extract the 11-character video id from a YouTube URL.
pub fn youtube_video_id(url: &str) -> Option<String> {
    let caps = RE_VIDEO_ID.captures(url)?;
    let id = caps.get(1)?.as_str();
    if id.chars().count() == 11 {
        Some(id.to_string())
    } else {
        None
    }
}

pub fn youtube_thumbnail(video_id: &str) -> String {
    format!("https://i.ytimg.com/vi/{video_id}/maxresdefault.jpg")
}

/// Strip a CSS `url(...)` wrapper and its quotes, e.g. from `background-image`.
pub fn css_url(value: &str) -> String {
    let value = value.trim();
    let inner = value
        .strip_prefix("url(")
        .and_then(|v| v.strip_suffix(')'))
        .unwrap_or(value);
    inner.trim().trim_matches(|c| c == '"' || c == '\'').to_string()
}
