use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement};

use tuna_core::overlay::status_lines;
use tuna_detect::TrackState;

const PANEL_STYLE: &str = "position: fixed; top: 0; left: 0; width: 320px; \
    background: rgba(0,0,0,0.85); color: white; z-index: 999999; padding: 10px; \
    font-family: monospace; font-size: 11px; border-left: 4px solid #8b5cf6; \
    border-radius: 0 0 8px 0; backdrop-filter: blur(10px);";

const PLAYING_COLOR: &str = "#22c55e";
const STOPPED_COLOR: &str = "#ef4444";

/// Fixed debug panel in the page's top-left corner.
pub struct Overlay {
    document: Document,
    panel: HtmlElement,
}

impl Overlay {
    pub fn mount(document: &Document) -> Result<Self, JsValue> {
        let panel = create_div(document)?;
        panel.set_attribute("style", PANEL_STYLE)?;
        panel.set_text_content(Some("TUNA: Loading..."));

        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;
        body.append_child(&panel)?;

        Ok(Self {
            document: document.clone(),
            panel,
        })
    }

    pub fn show(&self, state: &TrackState) -> Result<(), JsValue> {
        self.panel.set_text_content(None);
        for line in status_lines(state) {
            let row = create_div(&self.document)?;
            if line.starts_with('▶') {
                row.style().set_property("color", PLAYING_COLOR)?;
            } else if line.starts_with('⏸') {
                row.style().set_property("color", STOPPED_COLOR)?;
            }
            row.set_text_content(Some(&line));
            self.panel.append_child(&row)?;
        }
        Ok(())
    }
}

fn create_div(document: &Document) -> Result<HtmlElement, JsValue> {
    Ok(document.create_element("div")?.unchecked_into())
}
