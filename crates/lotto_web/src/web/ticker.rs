use std::rc::Rc;

use lotto_gate::player::Ticker;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// One-second `setInterval`.
///
/// The callback closure is kept until the next `start` or drop, not released
/// on `stop`, because `stop` usually runs from inside that callback.
pub(super) struct IntervalTicker {
    on_tick: Rc<dyn Fn()>,
    handle: Option<i32>,
    callback: Option<Closure<dyn FnMut()>>,
}

impl IntervalTicker {
    pub(super) fn new(on_tick: Rc<dyn Fn()>) -> Self {
        Self {
            on_tick,
            handle: None,
            callback: None,
        }
    }
}

impl Ticker for IntervalTicker {
    fn start(&mut self) {
        if self.handle.is_some() {
            return;
        }
        let Some(window) = web_sys::window() else {
            web_sys::console::warn_1(&"ticker: no window".into());
            return;
        };
        let on_tick = Rc::clone(&self.on_tick);
        let cb = Closure::wrap(Box::new(move || on_tick()) as Box<dyn FnMut()>);
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            1000,
        ) {
            Ok(id) => {
                self.handle = Some(id);
                self.callback = Some(cb);
            }
            Err(_) => web_sys::console::warn_1(&"ticker: setInterval failed".into()),
        }
    }

    fn stop(&mut self) {
        if let Some(id) = self.handle.take() {
            if let Some(w) = web_sys::window() {
                w.clear_interval_with_handle(id);
            }
        }
    }

    fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for IntervalTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
