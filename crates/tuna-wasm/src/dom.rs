//! [`Page`] over the live document.

use std::collections::BTreeMap;

use js_sys::{Array, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlInputElement, HtmlMediaElement, Window};

use tuna_detect::{
    Artwork, Element, MediaElement, MediaMetadata, MediaSession, Page, SessionState,
};

pub struct DomPage {
    window: Window,
    document: Document,
}

impl DomPage {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }
}

impl Page for DomPage {
    fn href(&self) -> String {
        self.window.location().href().unwrap_or_default()
    }

    fn hostname(&self) -> String {
        self.window.location().hostname().unwrap_or_default()
    }

    fn query(&self, selector: &str) -> Option<Element> {
        self.document
            .query_selector(selector)
            .ok()
            .flatten()
            .map(|el| snapshot(&el))
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let Ok(nodes) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .map(|el| snapshot(&el))
            .collect()
    }

    fn query_in(&self, scope: &str, selector: &str) -> Option<Element> {
        let scope = self.document.query_selector(scope).ok().flatten()?;
        scope
            .query_selector(selector)
            .ok()
            .flatten()
            .map(|el| snapshot(&el))
    }

    fn media_session(&self) -> MediaSession {
        let session = get(&JsValue::from(self.window.navigator()), "mediaSession");
        if session.is_undefined() || session.is_null() {
            return MediaSession::default();
        }

        let playback_state = match get_string(&session, "playbackState").as_deref() {
            Some("playing") => SessionState::Playing,
            Some("paused") => SessionState::Paused,
            _ => SessionState::None,
        };

        let metadata = get(&session, "metadata");
        let metadata = (!metadata.is_null() && !metadata.is_undefined()).then(|| MediaMetadata {
            title: get_string(&metadata, "title"),
            artist: get_string(&metadata, "artist"),
            album: get_string(&metadata, "album"),
            artwork: read_artwork(&get(&metadata, "artwork")),
        });

        MediaSession {
            playback_state,
            metadata,
        }
    }

    fn media_element(&self) -> Option<MediaElement> {
        let video = self
            .document
            .query_selector("video")
            .ok()
            .flatten()?
            .dyn_into::<HtmlMediaElement>()
            .ok()?;
        Some(MediaElement {
            paused: video.paused(),
            current_time: video.current_time(),
            duration: video.duration(),
        })
    }
}

/// Copy what adapters read off a live element.
fn snapshot(el: &web_sys::Element) -> Element {
    let attributes: BTreeMap<String, String> = el
        .get_attribute_names()
        .iter()
        .filter_map(|name| name.as_string())
        .filter_map(|name| el.get_attribute(&name).map(|value| (name, value)))
        .collect();

    Element {
        text: el.text_content().unwrap_or_default(),
        attributes,
        value: el.dyn_ref::<HtmlInputElement>().map(HtmlInputElement::value),
    }
}

fn read_artwork(value: &JsValue) -> Vec<Artwork> {
    if !Array::is_array(value) {
        return Vec::new();
    }
    Array::from(value)
        .iter()
        .filter_map(|entry| {
            Some(Artwork {
                src: get_string(&entry, "src")?,
                sizes: get_string(&entry, "sizes"),
            })
        })
        .collect()
}

fn get(target: &JsValue, key: &str) -> JsValue {
    Reflect::get(target, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}

fn get_string(target: &JsValue, key: &str) -> Option<String> {
    get(target, key).as_string()
}
