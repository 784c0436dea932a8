//! Watch-time gate.
//!
//! Counts watched seconds toward a fixed threshold. Pure arithmetic: the caller
//! decides where ticks come from (player events, a fallback interval, a test).

/// Seconds of watching required before the done action unlocks.
pub const WATCH_THRESHOLD_SECS: u32 = 60;

/// The pre-warm fires this many seconds before the threshold.
pub const PREWARM_LEAD_SECS: u32 = 20;

/// Result of a single [`TimerGate::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateTick {
    pub elapsed: u32,
    pub remaining: u32,
    /// True on the one tick that crosses `threshold - PREWARM_LEAD_SECS`.
    pub prewarm: bool,
    pub unlocked: bool,
}

#[derive(Debug, Clone)]
pub struct TimerGate {
    elapsed: u32,
    threshold: u32,
    warmed_up: bool,
}

impl TimerGate {
    pub fn new() -> Self {
        Self::with_threshold(WATCH_THRESHOLD_SECS)
    }

    pub fn with_threshold(threshold: u32) -> Self {
        Self {
            elapsed: 0,
            threshold,
            warmed_up: false,
        }
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn remaining(&self) -> u32 {
        self.threshold.saturating_sub(self.elapsed)
    }

    pub fn is_unlocked(&self) -> bool {
        self.elapsed >= self.threshold
    }

    pub fn warmed_up(&self) -> bool {
        self.warmed_up
    }

    fn prewarm_at(&self) -> u32 {
        self.threshold.saturating_sub(PREWARM_LEAD_SECS)
    }

    /// One watched second. Ticks after unlock leave `elapsed` where it is.
    pub fn advance(&mut self) -> GateTick {
        if !self.is_unlocked() {
            self.elapsed += 1;
        }

        let prewarm = !self.warmed_up && self.elapsed >= self.prewarm_at();
        if prewarm {
            self.warmed_up = true;
        }

        GateTick {
            elapsed: self.elapsed,
            remaining: self.remaining(),
            prewarm,
            unlocked: self.is_unlocked(),
        }
    }

    /// The video ended: jump straight to the threshold. Does not pre-warm.
    pub fn complete(&mut self) {
        self.elapsed = self.elapsed.max(self.threshold);
    }

    pub fn reset(&mut self) {
        self.elapsed = 0;
        self.warmed_up = false;
    }

    pub fn remaining_label(&self) -> String {
        remaining_label(self.remaining())
    }
}

/// Countdown text shown in the gate modal.
pub fn remaining_label(remaining: u32) -> String {
    format!("Remaining watch time: {remaining}s")
}

impl Default for TimerGate {
    fn default() -> Self {
        Self::new()
    }
}
