//! Gate session: one open watch modal.
//!
//! Owns the timer gate, the ticker and the player instance for exactly as long
//! as the watch modal is open. `close()` is idempotent and also runs on drop.

use crate::gate::{GateTick, TimerGate};
use crate::player::{EmbeddedPlayer, Playback, PlayerState, Ticker, TickerCommand};

pub type PrewarmFn = Box<dyn FnMut()>;

pub struct GateSession<T: Ticker, P: EmbeddedPlayer> {
    gate: TimerGate,
    ticker: T,
    player: Option<P>,
    prewarm: PrewarmFn,
    closed: bool,
}

impl<T: Ticker, P: EmbeddedPlayer> GateSession<T, P> {
    /// Opens with a zeroed gate. The fallback capability starts counting at once;
    /// an embedded player starts it when playback begins.
    pub fn open(ticker: T, playback: Playback<P>, prewarm: PrewarmFn) -> Self {
        Self::with_gate(TimerGate::new(), ticker, playback, prewarm)
    }

    pub fn with_gate(
        mut gate: TimerGate,
        mut ticker: T,
        playback: Playback<P>,
        prewarm: PrewarmFn,
    ) -> Self {
        gate.reset();
        let player = match playback {
            Playback::Embedded(p) => Some(p),
            Playback::Fallback => {
                ticker.start();
                None
            }
        };
        Self {
            gate,
            ticker,
            player,
            prewarm,
            closed: false,
        }
    }

    pub fn gate(&self) -> &TimerGate {
        &self.gate
    }

    pub fn is_unlocked(&self) -> bool {
        self.gate.is_unlocked()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    /// One second of watching. Fires the pre-warm once and stops the ticker at
    /// unlock.
    pub fn tick(&mut self) -> GateTick {
        if self.closed {
            return self.snapshot();
        }
        let tick = self.gate.advance();
        if tick.prewarm {
            (self.prewarm)();
        }
        if tick.unlocked {
            self.ticker.stop();
        }
        tick
    }

    pub fn on_player_state(&mut self, state: PlayerState) -> GateTick {
        if self.closed {
            return self.snapshot();
        }
        match TickerCommand::from(state) {
            TickerCommand::Start => {
                if !self.gate.is_unlocked() {
                    self.ticker.start();
                }
            }
            TickerCommand::Stop => self.ticker.stop(),
            TickerCommand::Complete => {
                self.gate.complete();
                self.ticker.stop();
            }
            TickerCommand::Ignore => {}
        }
        self.snapshot()
    }

    fn snapshot(&self) -> GateTick {
        GateTick {
            elapsed: self.gate.elapsed(),
            remaining: self.gate.remaining(),
            prewarm: false,
            unlocked: self.gate.is_unlocked(),
        }
    }

    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.ticker.stop();
        if let Some(mut player) = self.player.take() {
            player.destroy();
        }
    }
}

impl<T: Ticker, P: EmbeddedPlayer> Drop for GateSession<T, P> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Default)]
    struct FakeTicker {
        running: bool,
        starts: u32,
    }

    impl Ticker for FakeTicker {
        fn start(&mut self) {
            if !self.running {
                self.running = true;
                self.starts += 1;
            }
        }

        fn stop(&mut self) {
            self.running = false;
        }

        fn is_running(&self) -> bool {
            self.running
        }
    }

    struct FakePlayer {
        destroyed: Rc<Cell<u32>>,
    }

    impl EmbeddedPlayer for FakePlayer {
        fn destroy(&mut self) {
            self.destroyed.set(self.destroyed.get() + 1);
        }
    }

    fn counter() -> (Rc<Cell<u32>>, PrewarmFn) {
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        (hits, Box::new(move || h.set(h.get() + 1)))
    }

    #[test]
    fn fallback_starts_counting_immediately() {
        let (_, prewarm) = counter();
        let s: GateSession<FakeTicker, FakePlayer> =
            GateSession::open(FakeTicker::default(), Playback::Fallback, prewarm);
        assert!(s.ticker().is_running());
    }

    #[test]
    fn embedded_waits_for_playing() {
        let destroyed = Rc::new(Cell::new(0));
        let (_, prewarm) = counter();
        let mut s = GateSession::open(
            FakeTicker::default(),
            Playback::Embedded(FakePlayer {
                destroyed: Rc::clone(&destroyed),
            }),
            prewarm,
        );
        assert!(!s.ticker().is_running());

        s.on_player_state(PlayerState::Playing);
        assert!(s.ticker().is_running());
        s.on_player_state(PlayerState::Paused);
        assert!(!s.ticker().is_running());
        s.on_player_state(PlayerState::Buffering);
        assert!(!s.ticker().is_running());
    }

    #[test]
    fn prewarm_runs_once_and_ticker_stops_at_unlock() {
        let (hits, prewarm) = counter();
        let mut s: GateSession<FakeTicker, FakePlayer> =
            GateSession::open(FakeTicker::default(), Playback::Fallback, prewarm);

        for i in 1..=39 {
            s.tick();
            assert_eq!(hits.get(), 0, "tick {i}");
        }
        s.tick();
        assert_eq!(hits.get(), 1);

        for _ in 0..30 {
            s.tick();
        }
        assert_eq!(hits.get(), 1);
        assert!(s.is_unlocked());
        assert!(!s.ticker().is_running());
    }

    #[test]
    fn ended_unlocks_and_stops() {
        let destroyed = Rc::new(Cell::new(0));
        let (hits, prewarm) = counter();
        let mut s = GateSession::open(
            FakeTicker::default(),
            Playback::Embedded(FakePlayer {
                destroyed: Rc::clone(&destroyed),
            }),
            prewarm,
        );
        s.on_player_state(PlayerState::Playing);
        let tick = s.on_player_state(PlayerState::Ended);
        assert!(tick.unlocked);
        assert_eq!(tick.remaining, 0);
        assert!(!s.ticker().is_running());
        assert_eq!(hits.get(), 0);

        // Replaying after completion does not restart the countdown.
        s.on_player_state(PlayerState::Playing);
        assert!(!s.ticker().is_running());
    }

    #[test]
    fn close_is_idempotent_and_releases_player_once() {
        let destroyed = Rc::new(Cell::new(0));
        let (_, prewarm) = counter();
        let mut s = GateSession::open(
            FakeTicker::default(),
            Playback::Embedded(FakePlayer {
                destroyed: Rc::clone(&destroyed),
            }),
            prewarm,
        );
        s.on_player_state(PlayerState::Playing);
        s.close();
        s.close();
        assert_eq!(destroyed.get(), 1);
        assert!(!s.ticker().is_running());

        let before = s.gate().elapsed();
        s.tick();
        assert_eq!(s.gate().elapsed(), before);

        drop(s);
        assert_eq!(destroyed.get(), 1);
    }

    #[test]
    fn drop_releases_player() {
        let destroyed = Rc::new(Cell::new(0));
        let (_, prewarm) = counter();
        {
            let _s = GateSession::open(
                FakeTicker::default(),
                Playback::Embedded(FakePlayer {
                    destroyed: Rc::clone(&destroyed),
                }),
                prewarm,
            );
        }
        assert_eq!(destroyed.get(), 1);
    }
}
