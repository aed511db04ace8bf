//! RoundState - everything that changes during one round
//!
//! Mutated only by the turn orchestrator. A new round replaces the hands and
//! piles wholesale but keeps the players' cumulative scores.

use serde::{Deserialize, Serialize};

use super::game_settings::{GameSettings, HUMAN_SEAT, PLAYER_COUNT};
use crate::domain::entities::{Card, Player, Rank};
use crate::domain::services::DeckManager;

/// Round phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoundPhase {
    NotStarted,
    AwaitingDraw,
    AwaitingDiscardOrBeat,
    Ended,
}

impl Default for RoundPhase {
    fn default() -> Self {
        RoundPhase::NotStarted
    }
}

impl RoundPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundPhase::NotStarted => "notStarted",
            RoundPhase::AwaitingDraw => "awaitingDraw",
            RoundPhase::AwaitingDiscardOrBeat => "awaitingDiscardOrBeat",
            RoundPhase::Ended => "ended",
        }
    }
}

/// How a finished round ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSummary {
    pub round_number: u32,
    /// Player who beat, `None` for a void round
    pub winner: Option<usize>,
    /// Penalty added to each player this round
    pub penalties: [u32; PLAYER_COUNT],
    /// Neither pile could supply a card
    pub exhausted: bool,
}

/// Mutable state of the current round
#[derive(Debug, Clone)]
pub struct RoundState {
    pub deck: DeckManager,
    pub players: [Player; PLAYER_COUNT],
    pub current_player_index: usize,
    pub phase: RoundPhase,
    /// Bumped on every new round; stale AI steps compare against it
    pub generation: u64,
    pub round_number: u32,
    pub last_round: Option<RoundSummary>,
}

impl RoundState {
    pub fn new(settings: &GameSettings) -> Self {
        let [first, second, third] = settings.ai_difficulty;
        Self {
            deck: DeckManager::new(settings.seed),
            players: [
                Player::human("You"),
                Player::ai("Bot 1", first),
                Player::ai("Bot 2", second),
                Player::ai("Bot 3", third),
            ],
            current_player_index: HUMAN_SEAT,
            phase: RoundPhase::NotStarted,
            generation: 0,
            round_number: 0,
            last_round: None,
        }
    }

    #[inline]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_index]
    }

    #[inline]
    pub fn current_player_mut(&mut self) -> &mut Player {
        &mut self.players[self.current_player_index]
    }

    pub fn wildcard_rank(&self) -> Option<Rank> {
        self.deck.wildcard_rank()
    }

    pub fn top_discard(&self) -> Option<Card> {
        self.deck.top_discard()
    }

    /// Advance to the next seat
    pub fn advance_turn(&mut self) {
        self.current_player_index = (self.current_player_index + 1) % PLAYER_COUNT;
        self.phase = RoundPhase::AwaitingDraw;
    }

    /// Cards in both piles and every hand. Once a round is dealt this equals
    /// the deck size minus the vira.
    pub fn cards_in_circulation(&self) -> usize {
        self.deck.pile_cards() + self.players.iter().map(|p| p.hand.len()).sum::<usize>()
    }

    pub fn scores(&self) -> [u32; PLAYER_COUNT] {
        [
            self.players[0].score,
            self.players[1].score,
            self.players[2].score,
            self.players[3].score,
        ]
    }
}
