//! Async game session
//!
//! Drives AI turns with a think delay before each step. The orchestrator sits
//! behind a mutex that is never held across a sleep, so the human side can
//! restart the round at any time; a step that wakes up in a newer round is
//! dropped.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use super::{AiStep, TurnOrchestrator};
use crate::domain::errors::GameError;
use crate::infrastructure::random::{RandomSource, SeededRandom};

/// Shared handle to a running game
#[derive(Clone)]
pub struct GameSession {
    game: Arc<Mutex<TurnOrchestrator>>,
    think_random: Arc<Mutex<Box<dyn RandomSource>>>,
    /// Held by the one `run_ai_turns` call allowed to drive at a time
    turn_driver: Arc<Mutex<()>>,
    min_think: Duration,
    max_think: Duration,
}

impl GameSession {
    pub fn new(game: TurnOrchestrator) -> Self {
        let seed = game.settings().seed.map(|s| s.wrapping_add(2));
        Self::with_random(game, Box::new(SeededRandom::new(seed)))
    }

    pub fn with_random(game: TurnOrchestrator, think_random: Box<dyn RandomSource>) -> Self {
        let (min_think, max_think) = game.settings().think_time_range();
        Self {
            game: Arc::new(Mutex::new(game)),
            think_random: Arc::new(Mutex::new(think_random)),
            turn_driver: Arc::new(Mutex::new(())),
            min_think,
            max_think,
        }
    }

    /// Run `f` with exclusive access to the orchestrator
    pub async fn with_game<R>(&self, f: impl FnOnce(&mut TurnOrchestrator) -> R) -> R {
        let mut game = self.game.lock().await;
        f(&mut game)
    }

    pub async fn start_new_game(&self) -> Result<(), GameError> {
        self.game.lock().await.start_new_game()
    }

    async fn think(&self) {
        let unit = self.think_random.lock().await.next_unit();
        let delay = self.min_think + (self.max_think - self.min_think).mul_f64(unit);
        tracing::trace!("Thinking for {:?}", delay);
        tokio::time::sleep(delay).await;
    }

    /// Play AI turns until the human is up, the round ends, or the round this
    /// call started in is replaced. Returns the number of completed AI turns.
    ///
    /// Only one call drives at a time; a call made while another is running
    /// returns `Ok(0)` right away.
    pub async fn run_ai_turns(&self) -> Result<usize, GameError> {
        let Ok(_driver) = self.turn_driver.try_lock() else {
            tracing::warn!("AI turns are already being driven");
            return Ok(0);
        };

        let mut turns = 0;
        loop {
            let generation = {
                let game = self.game.lock().await;
                if !game.is_ai_turn() {
                    return Ok(turns);
                }
                game.generation()
            };

            self.think().await;
            match self.game.lock().await.ai_draw_step(generation)? {
                AiStep::Drew { .. } => {}
                AiStep::Idle => {}
                AiStep::Stale => {
                    tracing::warn!("AI turn abandoned: round was restarted during draw");
                    return Ok(turns);
                }
                _ => return Ok(turns),
            }

            self.think().await;
            match self.game.lock().await.ai_finish_turn_step(generation)? {
                AiStep::Discarded { .. } => turns += 1,
                AiStep::Beat { .. } => return Ok(turns + 1),
                AiStep::Stale => {
                    tracing::warn!("AI turn abandoned: round was restarted during discard");
                    return Ok(turns);
                }
                _ => return Ok(turns),
            }
        }
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("min_think", &self.min_think)
            .field("max_think", &self.max_think)
            .finish_non_exhaustive()
    }
}
