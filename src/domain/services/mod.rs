pub mod combination_detector;
pub mod deck_manager;
pub mod hand_evaluator;
pub mod scoring;

pub use combination_detector::find_combinations;
pub use deck_manager::{build_deck, DeckManager, CARDS_PER_DECK};
pub use hand_evaluator::{
    evaluate_all_cards, evaluate_hand_quality, is_beat_eligible, CardEvaluation,
};
pub use scoring::hand_penalty;
