//! Terminal watch gate.
//!
//! There is no embedded player in a terminal, so sessions always run on the
//! fallback countdown, paced by a tokio interval.

use std::future::Future;
use std::io::Write as _;
use std::time::Duration;

use lotto_gate::player::{EmbeddedPlayer, Playback, Ticker, VideoCatalog};
use lotto_gate::prng::Prng;
use lotto_gate::session::{GateSession, PrewarmFn};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::error::CliError;

/// Running flag flipped by the session; the interval keeps firing regardless
/// and ticks are only forwarded while it is set.
#[derive(Debug, Default)]
pub struct FlagTicker {
    running: bool,
}

impl Ticker for FlagTicker {
    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

/// Uninhabited: a terminal never has an embedded player.
pub enum NoPlayer {}

impl EmbeddedPlayer for NoPlayer {
    fn destroy(&mut self) {
        match *self {}
    }
}

pub type TerminalSession = GateSession<FlagTicker, NoPlayer>;

fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Counts down to unlock. Returns whether the gate unlocked; Ctrl-C aborts.
pub async fn run_gate(prewarm: PrewarmFn) -> Result<bool, CliError> {
    let catalog = VideoCatalog::default();
    if let Some(id) = catalog.pick(&mut Prng::new(time_seed())) {
        println!("Take a stretch break while you wait: {}", VideoCatalog::watch_url(id));
    }

    let mut session: TerminalSession = GateSession::open(FlagTicker::default(), Playback::Fallback, prewarm);
    print_remaining(&session);

    let mut interval = tokio::time::interval(Duration::from_secs(1));
    // The first tick completes immediately.
    interval.tick().await;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    while !session.is_unlocked() {
        tokio::select! {
            _ = interval.tick() => {
                if session.ticker().is_running() {
                    session.tick();
                    print_remaining(&session);
                }
            }
            _ = &mut ctrl_c => {
                println!();
                session.close();
                return Err(CliError::Interrupted);
            }
        }
    }

    println!();
    info!("Watch gate unlocked after {}s", session.gate().elapsed());
    let unlocked = session.is_unlocked();
    session.close();
    Ok(unlocked)
}

fn print_remaining(session: &TerminalSession) {
    print!("\r{}   ", session.gate().remaining_label());
    let _ = std::io::stdout().flush();
}

/// Runs `fut` unless `interrupt` resolves first.
pub async fn until<F: Future>(fut: F, interrupt: impl Future) -> Result<F::Output, CliError> {
    tokio::select! {
        out = fut => Ok(out),
        _ = interrupt => Err(CliError::Interrupted),
    }
}

/// Once `run_gate` has listened for Ctrl-C the default SIGINT handler stays
/// replaced for the life of the process, so every later wait listens too.
pub async fn interruptible<F: Future>(fut: F) -> Result<F::Output, CliError> {
    until(fut, tokio::signal::ctrl_c()).await
}

/// The terminal's "done" button.
pub async fn wait_for_enter() -> Result<(), CliError> {
    println!("Press Enter to get your numbers.");
    let mut line = String::new();
    let mut stdin = BufReader::new(tokio::io::stdin());
    interruptible(stdin.read_line(&mut line)).await??;
    Ok(())
}
