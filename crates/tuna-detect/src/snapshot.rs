//! Recorded pages.
//!
//! A snapshot stores, per selector, what a live `querySelector` returned at
//! capture time. Lookups are by exact selector string, so a snapshot answers
//! the same questions the adapters ask and nothing else.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::page::{Element, MediaElement, MediaSession, Page};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// An element together with the selector (and optional scope) it answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedElement {
    pub selector: String,
    /// Scope selector for lookups made through [`Page::query_in`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub within: Option<String>,
    #[serde(flatten)]
    pub element: Element,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub url: String,
    #[serde(default)]
    pub elements: Vec<RecordedElement>,
    #[serde(default)]
    pub media_session: MediaSession,
    #[serde(default)]
    pub media: Option<MediaElement>,
}

impl PageSnapshot {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Record `element` as a document-level match for `selector`.
    pub fn with(mut self, selector: &str, element: Element) -> Self {
        self.elements.push(RecordedElement {
            selector: selector.to_string(),
            within: None,
            element,
        });
        self
    }

    /// Record `element` as a match for `selector` inside `scope`.
    pub fn with_in(mut self, scope: &str, selector: &str, element: Element) -> Self {
        self.elements.push(RecordedElement {
            selector: selector.to_string(),
            within: Some(scope.to_string()),
            element,
        });
        self
    }

    pub fn with_session(mut self, session: MediaSession) -> Self {
        self.media_session = session;
        self
    }

    pub fn with_media(mut self, media: MediaElement) -> Self {
        self.media = Some(media);
        self
    }

    fn matches<'a>(
        &'a self,
        scope: Option<&'a str>,
        selector: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements
            .iter()
            .filter(move |r| r.selector == selector && r.within.as_deref() == scope)
            .map(|r| &r.element)
    }
}

impl Page for PageSnapshot {
    fn href(&self) -> String {
        self.url.clone()
    }

    fn hostname(&self) -> String {
        url::Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_default()
    }

    fn query(&self, selector: &str) -> Option<Element> {
        self.matches(None, selector).next().cloned()
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        self.matches(None, selector).cloned().collect()
    }

    fn query_in(&self, scope: &str, selector: &str) -> Option<Element> {
        self.query(scope)?;
        self.matches(Some(scope), selector).next().cloned()
    }

    fn media_session(&self) -> MediaSession {
        self.media_session.clone()
    }

    fn media_element(&self) -> Option<MediaElement> {
        self.media
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::SessionState;

    const SNAPSHOT_JSON: &str = r#"{
        "url": "https://open.spotify.com/album/xyz",
        "elements": [
            { "selector": "[data-testid=\"playback-position\"]", "text": "1:05" },
            { "selector": ".queue", "text": "" },
            { "selector": ".title", "within": ".queue", "text": "Next Song" },
            { "selector": "input", "attributes": { "max": "200" }, "value": "15" }
        ],
        "media_session": {
            "playback_state": "playing",
            "metadata": { "title": "Song", "artist": "Artist", "artwork": [{ "src": "a.jpg" }] }
        }
    }"#;

    #[test]
    fn test_parse_json() {
        let page = PageSnapshot::from_json(SNAPSHOT_JSON).unwrap();
        assert_eq!(page.hostname(), "open.spotify.com");
        assert_eq!(
            page.query("[data-testid=\"playback-position\"]").unwrap().text,
            "1:05"
        );
        assert_eq!(page.media_session().playback_state, SessionState::Playing);
        let input = page.query("input").unwrap();
        assert_eq!(input.number_value(), Some(15.0));
        assert_eq!(input.number_attr("max"), Some(200.0));
        assert!(page.media_element().is_none());
    }

    #[test]
    fn test_scoped_lookup() {
        let page = PageSnapshot::from_json(SNAPSHOT_JSON).unwrap();
        assert_eq!(page.query_in(".queue", ".title").unwrap().text, "Next Song");
        // A scoped record is not visible at document level.
        assert!(page.query(".title").is_none());
    }

    #[test]
    fn test_scoped_lookup_requires_scope() {
        let page = PageSnapshot::new("https://soundcloud.com/")
            .with_in(".missing", ".title", Element::with_text("x"));
        assert!(page.query_in(".missing", ".title").is_none());
    }

    #[test]
    fn test_query_all_preserves_order() {
        let page = PageSnapshot::new("https://music.youtube.com/")
            .with("a", Element::with_text("one"))
            .with("b", Element::with_text("other"))
            .with("a", Element::with_text("two"));
        let texts: Vec<_> = page.query_all("a").into_iter().map(|e| e.text).collect();
        assert_eq!(texts, ["one", "two"]);
    }

    #[test]
    fn test_first_of() {
        let page = PageSnapshot::new("https://www.youtube.com/")
            .with("#second", Element::with_text("second"))
            .with("#third", Element::with_text("third"));
        assert_eq!(
            page.first_of(&["#first", "#second", "#third"]).unwrap().text,
            "second"
        );
    }

    #[test]
    fn test_bad_url_has_empty_host() {
        assert_eq!(PageSnapshot::new("not a url").hostname(), "");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.json");
        std::fs::write(&path, SNAPSHOT_JSON).unwrap();
        let page = PageSnapshot::load(&path).unwrap();
        assert_eq!(page.elements.len(), 4);

        assert!(matches!(
            PageSnapshot::load(&dir.path().join("missing.json")),
            Err(SnapshotError::Io(_))
        ));
    }
}
