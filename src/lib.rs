//! # lotto_gate
//!
//! Client-side logic for a watch-gated lottery prediction front-end.
//!
//! A prediction is only requested after the visitor has watched a short video
//! for [`gate::WATCH_THRESHOLD_SECS`] seconds (or, with the gate disabled, right
//! away). This crate holds everything that does not touch a real DOM or socket,
//! so the browser app and the terminal client share one implementation.
//!
//! ## Quick Start
//!
//! ```
//! use lotto_gate::prelude::*;
//!
//! let mut flow = PredictFlow::new(FlowConfig::default());
//! assert_eq!(flow.on_trigger(), FlowAction::OpenGate);
//!
//! let mut gate = TimerGate::new();
//! while !gate.advance().unlocked {}
//!
//! let FlowAction::Predict(request) = flow.on_done(gate.is_unlocked()) else {
//!     unreachable!();
//! };
//! assert_eq!(request.num_sets, 1);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): wire types derive serde and the [`client`] module is
//!   available.
//!
//! ## Modules
//!
//! - [`gate`]: watched-seconds counter with one-shot pre-warm
//! - [`player`]: player states, video catalog, ticker/player seams
//! - [`session`]: one open watch modal (gate + ticker + player)
//! - [`modal`]: modal open/close with focus restoration
//! - [`client`]: prediction service calls over a transport seam
//! - [`render`]: responses to view models
//! - [`flow`]: trigger/done/finish policy and the feedback form

pub mod api;
pub mod config;
pub mod error;
pub mod flow;
pub mod gate;
pub mod modal;
pub mod player;
pub mod prng;
pub mod render;
pub mod session;

#[cfg(feature = "serde")]
pub mod client;

pub mod prelude {
    pub use crate::api::{
        ComprehensiveAnalysis, Disclaimer, PredictMethod, PredictionRequest, PredictionResponse,
    };
    pub use crate::config::{ApiBase, ClientConfig, FlowConfig};
    pub use crate::error::{ClientError, Notice, NoticeLevel, TransportError};
    pub use crate::flow::{FeedbackForm, FlowAction, FlowOutcome, PredictFlow, TriggerState};
    pub use crate::gate::{GateTick, TimerGate};
    pub use crate::modal::{FocusRestore, ModalController, ModalHost, ModalId};
    pub use crate::player::{EmbeddedPlayer, Playback, PlayerState, Ticker, VideoCatalog};
    pub use crate::prng::Prng;
    pub use crate::render::{render_analysis, render_prediction, RenderOptions, ResultView};
    pub use crate::session::GateSession;

    #[cfg(feature = "serde")]
    pub use crate::client::{HttpRequest, HttpResponse, PredictionClient, Transport};
}
