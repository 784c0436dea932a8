//! YouTube IFrame API adapter.
//!
//! [`load_sdk`] appends the loader script once; until `YT.Player` exists every
//! gate runs on the countdown alone.

use lotto_gate::player::{EmbeddedPlayer, PlayerState};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;

use crate::ui_model::{embedded_player_usable, sdk_script_selector, PLAYER_ELEMENT_ID, YT_IFRAME_API_SRC};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = YT, js_name = Player)]
    type YtPlayer;

    #[wasm_bindgen(constructor, js_namespace = YT, js_class = "Player", catch)]
    fn new(element_id: &str, options: &JsValue) -> Result<YtPlayer, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn destroy(this: &YtPlayer) -> Result<(), JsValue>;
}

/// The loader calls `onYouTubeIframeAPIReady` when it has finished.
pub(super) fn install_ready_hook() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let hook = Closure::wrap(
        Box::new(|| web_sys::console::log_1(&"youtube: SDK ready".into())) as Box<dyn FnMut()>,
    );
    if js_sys::Reflect::set(&window, &"onYouTubeIframeAPIReady".into(), hook.as_ref()).is_err() {
        web_sys::console::warn_1(&"youtube: could not install ready hook".into());
    }
    hook.forget();
}

/// Appends the IFrame API loader to `<head>` unless the page already has it.
pub(super) fn load_sdk() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if let Ok(Some(_)) = document.query_selector(&sdk_script_selector()) {
        return;
    }
    let script = match document.create_element("script") {
        Ok(el) => match el.dyn_into::<web_sys::HtmlScriptElement>() {
            Ok(s) => s,
            Err(_) => return,
        },
        Err(e) => {
            web_sys::console::warn_2(&"youtube: could not create loader".into(), &e);
            return;
        }
    };
    script.set_src(YT_IFRAME_API_SRC);
    script.set_async(true);
    let appended = document
        .head()
        .ok_or_else(|| JsValue::from_str("no <head>"))
        .and_then(|head| head.append_child(&script));
    if let Err(e) = appended {
        web_sys::console::warn_2(&"youtube: could not load SDK".into(), &e);
    }
}

/// `YT.Player` defined and the player element on the page.
pub(super) fn sdk_ready() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let ctor = js_sys::Reflect::get(&window, &"YT".into())
        .ok()
        .filter(|yt| yt.is_object())
        .and_then(|yt| js_sys::Reflect::get(&yt, &"Player".into()).ok())
        .is_some_and(|p| p.is_function());
    let container = window
        .document()
        .and_then(|d| d.get_element_by_id(PLAYER_ELEMENT_ID))
        .is_some();
    embedded_player_usable(ctor, container)
}

fn set(target: &js_sys::Object, key: &str, value: &JsValue) -> Result<(), JsValue> {
    js_sys::Reflect::set(target, &key.into(), value).map(|_| ())
}

pub(super) struct WebPlayer {
    player: YtPlayer,
    _on_state: Closure<dyn FnMut(JsValue)>,
}

impl WebPlayer {
    /// Replaces `element_id` with a player for `video_id`. State changes are
    /// forwarded as [`PlayerState`]s.
    pub(super) fn create(
        element_id: &str,
        video_id: &str,
        on_state: impl Fn(PlayerState) + 'static,
    ) -> Result<Self, JsValue> {
        let on_state = Closure::wrap(Box::new(move |event: JsValue| {
            let code = js_sys::Reflect::get(&event, &"data".into())
                .ok()
                .and_then(|d| d.as_f64())
                .map(|d| d as i32)
                .unwrap_or(i32::MIN);
            on_state(PlayerState::from_code(code));
        }) as Box<dyn FnMut(JsValue)>);

        let vars = js_sys::Object::new();
        set(&vars, "autoplay", &1.into())?;
        set(&vars, "controls", &1.into())?;
        set(&vars, "playsinline", &1.into())?;

        let events = js_sys::Object::new();
        set(&events, "onStateChange", on_state.as_ref())?;

        let options = js_sys::Object::new();
        set(&options, "videoId", &video_id.into())?;
        set(&options, "height", &"390".into())?;
        set(&options, "width", &"640".into())?;
        set(&options, "playerVars", &vars)?;
        set(&options, "events", &events)?;

        let player = YtPlayer::new(element_id, &options)?;
        Ok(Self {
            player,
            _on_state: on_state,
        })
    }
}

impl EmbeddedPlayer for WebPlayer {
    fn destroy(&mut self) {
        if let Err(e) = self.player.destroy() {
            web_sys::console::warn_2(&"youtube: destroy failed".into(), &e);
        }
    }
}
