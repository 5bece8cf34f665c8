use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Headers, Request, RequestInit, Response};

use tuna_core::{Envelope, Sink};

/// Posts envelopes with `fetch`. The listener must allow cross-origin
/// requests, since the page's origin is the music service.
pub struct FetchSink {
    endpoint: String,
}

impl FetchSink {
    pub fn new(port: u16) -> Self {
        Self {
            endpoint: format!("http://localhost:{port}/"),
        }
    }
}

impl Sink for FetchSink {
    fn send(&self, envelope: Envelope) {
        let body = match serde_json::to_string(&envelope) {
            Ok(body) => body,
            Err(e) => {
                web_sys::console::error_1(&format!("[Tuna] Encode failed: {e}").into());
                return;
            }
        };

        let endpoint = self.endpoint.clone();
        spawn_local(async move {
            if post(&endpoint, &body).await.is_err() {
                web_sys::console::log_1(&"[Tuna] Connection error".into());
            }
        });
    }
}

async fn post(endpoint: &str, body: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

    let headers = Headers::new()?;
    headers.set("Content-Type", "application/json")?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(endpoint, &init)?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()?;

    if response.ok() {
        Ok(())
    } else {
        Err(JsValue::from(response.status()))
    }
}
