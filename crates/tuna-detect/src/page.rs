//! Read-only view of a music service's page.
//!
//! Adapters only ever see a page through [`Page`], so the same extraction
//! code runs against the live DOM in the browser build and against a
//! recorded [`PageSnapshot`](crate::PageSnapshot) in tests and replays.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A queryable document plus the page's media signals.
pub trait Page {
    /// Full page URL.
    fn href(&self) -> String;

    /// Network host of the page (e.g. `music.youtube.com`).
    fn hostname(&self) -> String;

    /// First element matching a CSS selector.
    fn query(&self, selector: &str) -> Option<Element>;

    /// All elements matching a CSS selector, in document order.
    fn query_all(&self, selector: &str) -> Vec<Element>;

    /// First descendant matching `selector` inside the first `scope` match.
    fn query_in(&self, scope: &str, selector: &str) -> Option<Element>;

    /// The page's media-session object.
    fn media_session(&self) -> MediaSession;

    /// The page's first `<video>`/`<audio>` element, if any.
    fn media_element(&self) -> Option<MediaElement>;

    /// First element matched by the selectors, tried in order.
    fn first_of(&self, selectors: &[&str]) -> Option<Element> {
        selectors.iter().find_map(|s| self.query(s))
    }
}

/// Owned, read-only copy of a DOM element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Rendered text content.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Live value of form controls, which can differ from the `value` attribute.
    #[serde(default)]
    pub value: Option<String>,
}

impl Element {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Attribute value, `None` when missing or blank.
    pub fn non_empty_attr(&self, name: &str) -> Option<String> {
        self.attr(name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }

    /// Read one property from the inline `style` attribute.
    pub fn style_property(&self, name: &str) -> Option<String> {
        self.attr("style")?.split(';').find_map(|decl| {
            let (key, value) = decl.split_once(':')?;
            if key.trim().eq_ignore_ascii_case(name) {
                Some(value.trim().to_string())
            } else {
                None
            }
        })
    }

    /// Numeric value of a form control (live value first, then the attribute).
    pub fn number_value(&self) -> Option<f64> {
        self.value
            .as_deref()
            .or_else(|| self.attr("value"))
            .and_then(parse_number)
    }

    pub fn number_attr(&self, name: &str) -> Option<f64> {
        self.attr(name).and_then(parse_number)
    }
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// `navigator.mediaSession.playbackState`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    #[default]
    None,
    Paused,
    Playing,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    pub src: String,
    #[serde(default)]
    pub sizes: Option<String>,
}

/// `navigator.mediaSession.metadata`, populated by the page itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    /// Pages list artwork smallest first.
    #[serde(default)]
    pub artwork: Vec<Artwork>,
}

impl MediaMetadata {
    pub fn title(&self) -> Option<&str> {
        non_blank(self.title.as_deref())
    }

    pub fn artist(&self) -> Option<&str> {
        non_blank(self.artist.as_deref())
    }

    pub fn album(&self) -> Option<&str> {
        non_blank(self.album.as_deref())
    }

    pub fn first_artwork(&self) -> Option<&str> {
        non_blank(self.artwork.first().map(|a| a.src.as_str()))
    }

    /// Largest artwork, by the smallest-first convention.
    pub fn last_artwork(&self) -> Option<&str> {
        non_blank(self.artwork.last().map(|a| a.src.as_str()))
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSession {
    #[serde(default)]
    pub playback_state: SessionState,
    #[serde(default)]
    pub metadata: Option<MediaMetadata>,
}

/// Playback properties of an `HTMLMediaElement`, in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaElement {
    pub paused: bool,
    pub current_time: f64,
    /// `NaN` until the media's metadata has loaded.
    pub duration: f64,
}

impl MediaElement {
    pub fn progress_ms(&self) -> u64 {
        seconds_to_ms(self.current_time)
    }

    pub fn duration_ms(&self) -> u64 {
        seconds_to_ms(self.duration)
    }
}

/// Seconds to whole milliseconds, rounding down. Non-finite or negative is zero.
pub fn seconds_to_ms(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1000.0).floor() as u64
    } else {
        0
    }
}
