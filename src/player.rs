//! Video player capability model.
//!
//! The embeddable player SDK reports numeric play states; everything past the
//! boundary works with [`PlayerState`]. When the SDK is not ready the gate runs
//! on a plain countdown ([`Playback::Fallback`]).

use crate::prng::Prng;

/// Play states reported by the embedded player SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
    Unknown(i32),
}

impl PlayerState {
    pub fn from_code(code: i32) -> Self {
        match code {
            -1 => PlayerState::Unstarted,
            0 => PlayerState::Ended,
            1 => PlayerState::Playing,
            2 => PlayerState::Paused,
            3 => PlayerState::Buffering,
            5 => PlayerState::Cued,
            other => PlayerState::Unknown(other),
        }
    }
}

/// What the gate should do with its ticker after a player event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerCommand {
    Start,
    Stop,
    /// Force the gate to its threshold, then stop.
    Complete,
    Ignore,
}

impl From<PlayerState> for TickerCommand {
    fn from(state: PlayerState) -> Self {
        match state {
            PlayerState::Playing => TickerCommand::Start,
            PlayerState::Paused => TickerCommand::Stop,
            PlayerState::Ended => TickerCommand::Complete,
            _ => TickerCommand::Ignore,
        }
    }
}

/// Recurring one-second callback source owned by a gate session.
pub trait Ticker {
    /// Starting an already-running ticker is a no-op.
    fn start(&mut self);
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

/// Handle to a live embedded player.
pub trait EmbeddedPlayer {
    fn destroy(&mut self);
}

/// Capability set available when a session opens.
pub enum Playback<P> {
    Embedded(P),
    Fallback,
}

/// Fixed set of videos a watch session may play.
#[derive(Debug, Clone, Copy)]
pub struct VideoCatalog {
    ids: &'static [&'static str],
}

pub const STRETCH_VIDEO_IDS: &[&str] = &[
    "RUGuHL0-Yug",
    "TK-svYT9Qqg",
    "WXtLkFVS2QY",
    "XvG6EZTGYjs",
    "Qm1Q8YYop18",
];

impl VideoCatalog {
    pub const fn new(ids: &'static [&'static str]) -> Self {
        Self { ids }
    }

    pub fn ids(&self) -> &'static [&'static str] {
        self.ids
    }

    /// Uniform pick; `None` only for an empty catalog.
    pub fn pick(&self, rng: &mut Prng) -> Option<&'static str> {
        if self.ids.is_empty() {
            return None;
        }
        Some(self.ids[rng.gen_range_usize(0, self.ids.len())])
    }

    pub fn watch_url(id: &str) -> String {
        format!("https://www.youtube.com/watch?v={id}")
    }
}

impl Default for VideoCatalog {
    fn default() -> Self {
        Self::new(STRETCH_VIDEO_IDS)
    }
}
