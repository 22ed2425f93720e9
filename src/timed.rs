// Timed games
//
// A `Deadline` runs a once-per-second ticker that only publishes "expired" on a
// watch channel. All game state stays with the task driving the turn loop;
// `TimedGame` reads the deadline at turn boundaries and races the turn loop
// against the expiry signal so a player stuck at the prompt is cut off.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use crate::config::TIME_LIMIT;
use crate::console::{Console, GameEvent};
use crate::errors::PigResult;
use crate::game::{run_turns, Game, GameResult, TurnSource, TurnStatus, WinReason};

const TICK: Duration = Duration::from_secs(1);

/// Wall-clock budget measured from construction
#[derive(Debug)]
pub struct Deadline {
    started: Instant,
    limit: Duration,
    expired: watch::Receiver<bool>,
    ticker: JoinHandle<()>,
}

impl Deadline {
    /// Start the clock. Must be called from within a tokio runtime.
    pub fn start(limit: Duration) -> Self {
        let started = Instant::now();
        let (tx, rx) = watch::channel(false);

        let ticker = tokio::spawn(async move {
            let mut interval = time::interval(TICK);
            loop {
                interval.tick().await;
                let elapsed = started.elapsed();
                log::debug!("Deadline tick: {}s of {}s", elapsed.as_secs(), limit.as_secs());
                if elapsed > limit {
                    let _ = tx.send(true);
                    break;
                }
            }
        });

        Deadline {
            started,
            limit,
            expired: rx,
            ticker,
        }
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn remaining(&self) -> Duration {
        self.limit.saturating_sub(self.elapsed())
    }

    pub fn is_expired(&self) -> bool {
        *self.expired.borrow() || self.elapsed() > self.limit
    }

    /// Independent handle on the expiry signal
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.expired.clone()
    }
}

impl Drop for Deadline {
    fn drop(&mut self) {
        self.ticker.abort();
    }
}

/// Resolves once the ticker reports expiry.
async fn expired(rx: &mut watch::Receiver<bool>) {
    if rx.wait_for(|expired| *expired).await.is_err() {
        // ticker gone without firing; only the turn-boundary check remains
        std::future::pending::<()>().await;
    }
}

/// Any `TurnSource` with a wall-clock limit; the leader wins on expiry.
pub struct TimedGame<S: TurnSource = Game> {
    inner: S,
    deadline: Deadline,
}

impl<S: TurnSource> TimedGame<S> {
    /// Wrap with the standard one-minute limit.
    pub fn new(inner: S) -> Self {
        Self::with_limit(inner, TIME_LIMIT)
    }

    pub fn with_limit(inner: S, limit: Duration) -> Self {
        log::info!("Timed game: {}s limit", limit.as_secs());
        TimedGame {
            inner,
            deadline: Deadline::start(limit),
        }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Highest committed score wins; ties go to the earlier seat.
    pub fn declare_winner(&self) -> GameResult {
        self.inner.game().leader(WinReason::TimeExpired)
    }

    /// Play until someone reaches the target or time runs out, then announce
    /// the winner exactly once.
    pub async fn play_game(&mut self, console: &mut dyn Console) -> PigResult<GameResult> {
        let mut expiry = self.deadline.subscribe();

        let finished = tokio::select! {
            result = run_turns(&mut *self, &mut *console) => Some(result?),
            _ = expired(&mut expiry) => None,
        };

        let result = match finished {
            Some(result) => result,
            None => {
                log::info!(
                    "{}s deadline fired during a turn",
                    self.deadline.limit().as_secs()
                );
                console.display(&GameEvent::TimeUp);
                self.declare_winner()
            }
        };

        log::info!("Game over: {}", result);
        console.display(&result.announcement());
        Ok(result)
    }
}

#[async_trait]
impl<S: TurnSource> TurnSource for TimedGame<S> {
    async fn play_turn(&mut self, console: &mut dyn Console) -> PigResult<TurnStatus> {
        if self.deadline.is_expired() {
            log::info!("Deadline passed before turn start");
            console.display(&GameEvent::TimeUp);
            return Ok(TurnStatus::Expired);
        }

        console.display(&GameEvent::TimeRemaining {
            seconds: self.deadline.remaining().as_secs(),
        });
        self.inner.play_turn(console).await
    }

    fn game(&self) -> &Game {
        self.inner.game()
    }

    fn game_mut(&mut self) -> &mut Game {
        self.inner.game_mut()
    }
}
