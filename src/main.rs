use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bada::{DuelEngine, DuelError, DuelEvent, HouseCommentary, PlayerSlot};

/// Round count override from the environment; anything unparseable is an
/// `InvalidConfig` and the default stands.
fn parse_max_turns(raw: &str) -> Result<u32, DuelError> {
    raw.trim()
        .parse()
        .map_err(|_| DuelError::InvalidConfig(format!("not a turn count: {raw}")))
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bada=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Welcome to Bada - who has the bigger score?");

    let engine = DuelEngine::new(Arc::new(HouseCommentary));

    if let Ok(raw) = std::env::var("BADA_TURNS") {
        match parse_max_turns(&raw) {
            Ok(turns) => engine.set_max_turns(turns).await,
            Err(e) => warn!(error = %e, "Ignoring BADA_TURNS"),
        }
    }
    if let Ok(name) = std::env::var("BADA_PLAYER1") {
        engine.set_player_name(PlayerSlot::Player1, &name).await;
    }
    if let Ok(name) = std::env::var("BADA_PLAYER2") {
        engine.set_player_name(PlayerSlot::Player2, &name).await;
    }

    let mut events = engine.subscribe();
    engine.start().await;

    while let Ok(event) = events.recv().await {
        match event {
            DuelEvent::TurnCommitted { history, turn } => {
                if let Ok(point) = history.latest() {
                    info!(
                        turn,
                        player1 = point.player1_value,
                        player2 = point.player2_value,
                        "Turn committed"
                    );
                }
            }
            DuelEvent::ChipCue { louder } => {
                debug!(louder = %louder, "Chip cue");
            }
            DuelEvent::DuelFinished { outcome } => match serde_json::to_string(&outcome) {
                Ok(json) => info!(outcome = %json, "Duel finished"),
                Err(e) => warn!(error = %e, "Failed to serialize outcome"),
            },
            DuelEvent::Commentary { text } => {
                info!(commentary = %text, "Dealer says");
                break;
            }
            _ => {}
        }
    }
}
