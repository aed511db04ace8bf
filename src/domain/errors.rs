use super::entities::Card;
use super::value_objects::RoundPhase;

/// Errors raised by game actions.
///
/// Everything except `InvalidWildcardDefinition` is recoverable: the action
/// is rejected and the round state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Illegal action: {0}")]
    IllegalAction(#[from] IllegalAction),
    #[error("Deck exhausted: no pile can supply a card")]
    DeckExhausted,
    #[error("Cannot define wildcard: deck is empty")]
    InvalidWildcardDefinition,
}

/// Why an action was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IllegalAction {
    #[error("Not your turn: player {player} acted while it is player {current}'s turn")]
    NotYourTurn { player: usize, current: usize },
    #[error("Wrong phase: expected {expected:?}, round is in {actual:?}")]
    WrongPhase {
        expected: RoundPhase,
        actual: RoundPhase,
    },
    #[error("Card {0} is not in hand")]
    CardNotInHand(Card),
    #[error("Hand is not fully covered by completed melds")]
    NotEligibleToBeat,
    #[error("Hand is empty")]
    EmptyHand,
    #[error("Discard pile is empty")]
    EmptyDiscardPile,
    #[error("Game has not started")]
    GameNotStarted,
    #[error("Round has ended")]
    GameEnded,
    #[error("Unknown player {0}")]
    UnknownPlayer(usize),
}
