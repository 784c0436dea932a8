//! Modal open/close state machine with focus restoration.
//!
//! The document itself sits behind [`ModalHost`]; the controller only decides
//! what happens in which order.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalId {
    /// Watch-gate ("stretch") modal shown before a prediction.
    WatchGate,
    Feedback,
}

impl ModalId {
    /// DOM id of the modal root.
    pub fn element_id(self) -> &'static str {
        match self {
            ModalId::WatchGate => "stretch-modal",
            ModalId::Feedback => "feedback-modal",
        }
    }
}

/// Document operations a modal needs.
pub trait ModalHost {
    type Element: Clone;

    fn active_element(&self) -> Option<Self::Element>;
    fn is_attached(&self, el: &Self::Element) -> bool;
    /// Disabled controls drop focus as soon as they get it.
    fn is_focusable(&self, _el: &Self::Element) -> bool {
        true
    }
    fn focus(&self, el: &Self::Element);
    /// Control that receives focus when the recorded element is gone or
    /// cannot take focus.
    fn fallback_focus(&self) -> Self::Element;
    /// Mark every sibling of the modal non-interactive (or undo it).
    fn set_background_inert(&self, modal: ModalId, inert: bool);
    fn set_visible(&self, modal: ModalId, visible: bool);
    /// Focus the first enabled control inside the modal, or the modal itself.
    fn focus_first_control(&self, modal: ModalId);
}

/// Which element got focus back on close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusRestore {
    Previous,
    Fallback,
}

#[derive(Debug, Clone)]
pub enum ModalState<E> {
    Closed,
    Open { previously_focused: Option<E> },
}

#[derive(Debug, Clone)]
pub struct ModalController<E> {
    id: ModalId,
    state: ModalState<E>,
}

impl<E: Clone> ModalController<E> {
    pub fn new(id: ModalId) -> Self {
        Self {
            id,
            state: ModalState::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open { .. })
    }

    /// CLOSED → OPEN. Returns false when already open.
    pub fn open<H: ModalHost<Element = E>>(&mut self, host: &H) -> bool {
        if self.is_open() {
            return false;
        }
        let previously_focused = host.active_element();
        host.set_background_inert(self.id, true);
        host.set_visible(self.id, true);
        host.focus_first_control(self.id);
        self.state = ModalState::Open { previously_focused };
        true
    }

    /// OPEN → CLOSED. `None` when it was not open.
    ///
    /// Siblings are made interactive again before focus moves, since an inert
    /// element cannot take focus.
    pub fn close<H: ModalHost<Element = E>>(&mut self, host: &H) -> Option<FocusRestore> {
        let ModalState::Open { previously_focused } =
            std::mem::replace(&mut self.state, ModalState::Closed)
        else {
            return None;
        };

        host.set_background_inert(self.id, false);
        host.set_visible(self.id, false);

        match previously_focused {
            Some(el) if host.is_attached(&el) && host.is_focusable(&el) => {
                host.focus(&el);
                Some(FocusRestore::Previous)
            }
            _ => {
                host.focus(&host.fallback_focus());
                Some(FocusRestore::Fallback)
            }
        }
    }
}
