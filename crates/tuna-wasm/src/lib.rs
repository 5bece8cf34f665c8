//! Browser entry point: polls the live page and reports to the local listener.

mod dom;
mod overlay;
mod sink;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use tuna_core::Dispatcher;

use crate::dom::DomPage;
use crate::overlay::Overlay;
use crate::sink::FetchSink;

const PORT: u16 = 1608;
const REFRESH_RATE_MS: i32 = 500;
const DEBUG_ENABLED: bool = true;

#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let overlay = if DEBUG_ENABLED {
        Some(Overlay::mount(&document)?)
    } else {
        None
    };

    let page = DomPage::new(window.clone(), document);
    let mut dispatcher = Dispatcher::standard(FetchSink::new(PORT));

    let tick = Closure::wrap(Box::new(move || {
        let outcome = dispatcher.tick(&page, js_sys::Date::now() as u64);
        if let (Some(overlay), Some(state)) = (&overlay, outcome.state()) {
            if let Err(e) = overlay.show(state) {
                web_sys::console::warn_1(&e);
            }
        }
    }) as Box<dyn FnMut()>);

    window.set_interval_with_callback_and_timeout_and_arguments_0(
        tick.as_ref().unchecked_ref(),
        REFRESH_RATE_MS,
    )?;
    tick.forget();

    let host = window.location().hostname().unwrap_or_default();
    web_sys::console::log_1(&format!("[Tuna] Loaded for: {host}").into());
    Ok(())
}
