use lotto_gate::modal::{ModalHost, ModalId};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::ui_model::{focusable_query, CONTAINER_SELECTOR, PREDICT_BUTTON_ID, RESULTS_SECTION_ID};

/// Live document behind the modal controllers.
#[derive(Clone)]
pub(super) struct DomModalHost {
    document: Document,
    body: HtmlElement,
    trigger_busy: bool,
}

impl DomModalHost {
    /// `None` before the document has a body.
    pub(super) fn new() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let body = document.body()?;
        Some(Self {
            document,
            body,
            trigger_busy: false,
        })
    }

    /// The predict button is about to be disabled; its signal may not have
    /// reached the DOM yet.
    pub(super) fn trigger_busy(mut self, busy: bool) -> Self {
        self.trigger_busy = busy;
        self
    }

    fn by_id(&self, id: &str) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(id)
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
    }

    fn modal(&self, modal: ModalId) -> Option<HtmlElement> {
        self.by_id(modal.element_id())
    }
}

impl ModalHost for DomModalHost {
    type Element = HtmlElement;

    fn active_element(&self) -> Option<HtmlElement> {
        self.document
            .active_element()
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
    }

    fn is_attached(&self, el: &HtmlElement) -> bool {
        self.document.contains(Some(el.as_ref()))
    }

    fn is_focusable(&self, el: &HtmlElement) -> bool {
        if el.has_attribute("disabled") {
            return false;
        }
        !(self.trigger_busy && el.id() == PREDICT_BUTTON_ID)
    }

    fn focus(&self, el: &HtmlElement) {
        let _ = el.focus();
    }

    /// Predict button, else the results section, else the body.
    fn fallback_focus(&self) -> HtmlElement {
        self.by_id(PREDICT_BUTTON_ID)
            .filter(|b| self.is_focusable(b))
            .or_else(|| self.by_id(RESULTS_SECTION_ID))
            .unwrap_or_else(|| self.body.clone())
    }

    fn set_background_inert(&self, modal: ModalId, inert: bool) {
        let Ok(Some(container)) = self.document.query_selector(CONTAINER_SELECTOR) else {
            return;
        };
        let children = container.children();
        for i in 0..children.length() {
            let Some(child) = children.item(i) else {
                continue;
            };
            if child.id() == modal.element_id() {
                continue;
            }
            let _ = if inert {
                child.set_attribute("inert", "")
            } else {
                child.remove_attribute("inert")
            };
        }
    }

    fn set_visible(&self, modal: ModalId, visible: bool) {
        let Some(el) = self.modal(modal) else {
            return;
        };
        let classes = el.class_list();
        if visible {
            let _ = classes.remove_1("hidden");
            let _ = el.remove_attribute("aria-hidden");
            let _ = el.set_attribute("aria-modal", "true");
        } else {
            let _ = el.set_attribute("aria-hidden", "true");
            let _ = el.remove_attribute("aria-modal");
            let _ = classes.add_1("hidden");
        }
    }

    /// Deferred a turn so the modal is laid out before it takes focus.
    fn focus_first_control(&self, modal: ModalId) {
        let Some(el) = self.modal(modal) else {
            return;
        };
        let Some(window) = web_sys::window() else {
            return;
        };
        let cb = Closure::once_into_js(move || {
            let target = el
                .query_selector(&focusable_query())
                .ok()
                .flatten()
                .and_then(|e| e.dyn_into::<HtmlElement>().ok());
            match target {
                Some(t) => {
                    let _ = t.focus();
                }
                None => {
                    let _ = el.focus();
                }
            }
        });
        let _ = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), 0);
    }
}
