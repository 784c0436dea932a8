use lotto_gate::client::{HttpRequest, HttpResponse, Transport};
use lotto_gate::error::TransportError;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

/// `window.fetch` with an `AbortController` armed by `setTimeout`.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct FetchTransport;

fn network(msg: &str) -> TransportError {
    TransportError::Network(msg.to_string())
}

fn describe(e: &JsValue) -> String {
    e.as_string()
        .or_else(|| {
            e.dyn_ref::<js_sys::Error>()
                .map(|err| String::from(err.message()))
        })
        .unwrap_or_else(|| "fetch failed".to_string())
}

impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let window = web_sys::window().ok_or_else(|| network("no window"))?;
        let controller =
            web_sys::AbortController::new().map_err(|_| network("AbortController::new failed"))?;

        let init = web_sys::RequestInit::new();
        init.set_method(request.method.as_str());
        init.set_signal(Some(&controller.signal()));
        if let Some(body) = &request.body {
            let headers = web_sys::Headers::new().map_err(|_| network("Headers::new failed"))?;
            headers
                .set("Content-Type", "application/json")
                .map_err(|_| network("headers: set failed"))?;
            init.set_headers(&headers);
            init.set_body(&JsValue::from_str(body));
        }

        let abort = controller.clone();
        let on_timeout = Closure::once(move || abort.abort());
        let timer = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                on_timeout.as_ref().unchecked_ref(),
                request.timeout.as_millis().min(i32::MAX as u128) as i32,
            )
            .map_err(|_| network("setTimeout failed"))?;

        let result = fetch_text(&window, &request.url, &init).await;
        window.clear_timeout_with_handle(timer);
        drop(on_timeout);

        result.map_err(|e| {
            if controller.signal().aborted() {
                TransportError::Timeout
            } else {
                TransportError::Network(describe(&e))
            }
        })
    }
}

/// The abort signal covers the body read as well as the headers.
async fn fetch_text(
    window: &web_sys::Window,
    url: &str,
    init: &web_sys::RequestInit,
) -> Result<HttpResponse, JsValue> {
    let resp: web_sys::Response = JsFuture::from(window.fetch_with_str_and_init(url, init))
        .await?
        .dyn_into()?;
    let status = resp.status();
    let text = JsFuture::from(resp.text()?).await?;
    Ok(HttpResponse {
        status,
        body: text.as_string().unwrap_or_default(),
    })
}
