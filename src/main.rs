use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pife_engine::domain::entities::DifficultyTier;
use pife_engine::domain::value_objects::GameSettings;
use pife_engine::infrastructure::bot::AiStrategyEngine;
use pife_engine::{GameError, GameSession, TurnOrchestrator};

/// Table cycles before an unfinished round is abandoned
const MAX_CYCLES_PER_ROUND: usize = 200;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pife_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let rounds: u32 = match std::env::args().nth(1) {
        Some(arg) => arg.parse().context("rounds must be a positive number")?,
        None => 3,
    };

    let settings = GameSettings::from_env().context("invalid PIFE_* configuration")?;
    tracing::info!("Starting pife-sim: {} rounds, {:?}", rounds, settings);

    let mut human = AiStrategyEngine::seeded(settings.seed.map(|s| s.wrapping_add(3)));
    let mut game = TurnOrchestrator::new(settings)?;
    game.events().subscribe(|event| println!("{}", event.to_json()));
    let session = GameSession::new(game);

    for _ in 0..rounds {
        session.start_new_game().await?;
        play_round(&session, &mut human).await?;
    }

    let scores = session.with_game(|g| g.scores()).await;
    for (index, score) in scores.iter().enumerate() {
        let name = session
            .with_game(|g| g.player(index).map(|p| p.name.clone()))
            .await?;
        tracing::info!("{}: {} points", name, score);
    }
    println!("{}", serde_json::json!({ "type": "finalScores", "scores": scores }));

    Ok(())
}

async fn play_round(session: &GameSession, human: &mut AiStrategyEngine) -> anyhow::Result<()> {
    for _ in 0..MAX_CYCLES_PER_ROUND {
        let ended = session.with_game(|g| human_turn(g, human)).await?;
        if ended {
            return Ok(());
        }
        session.run_ai_turns().await?;
        if session.with_game(|g| g.is_game_ended()).await {
            return Ok(());
        }
    }
    tracing::warn!("Round abandoned after {} cycles", MAX_CYCLES_PER_ROUND);
    Ok(())
}

/// Play the human seat with the expert engine. Returns true if the round ended.
fn human_turn(game: &mut TurnOrchestrator, engine: &mut AiStrategyEngine) -> Result<bool, GameError> {
    const TIER: DifficultyTier = DifficultyTier::Expert;

    let Some(wildcard) = game.wildcard() else {
        return Ok(true);
    };

    let hand = game.human_hand().to_vec();
    let take_discard = game
        .top_discard_card()
        .is_some_and(|top| engine.should_draw_from_discard(TIER, &hand, wildcard, top));

    if take_discard {
        game.player_draw_from_discard()?;
    } else {
        match game.player_draw_from_deck() {
            Ok(_) => {}
            Err(GameError::DeckExhausted) => {
                game.player_draw_from_discard()?;
            }
            Err(e) => return Err(e),
        }
    }

    let hand = game.human_hand().to_vec();
    if engine.should_beat(TIER, &hand) {
        game.player_try_beat()?;
        return Ok(true);
    }

    let card = engine.decide_card_to_discard(TIER, &hand, wildcard)?;
    game.player_discard_card(card)?;
    Ok(false)
}
