use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

use crate::duel::{evaluate, Winner};
use crate::shared::DuelError;

/// Shown whenever the commentary service fails or takes too long.
pub const FALLBACK_COMMENTARY: &str = "THE CROWD GASPS AS THE NUMBERS FLUCTUATE!";

/// Upper bound on how long a commentary request may run. The duel itself
/// finished before the request starts, so this only caps display latency.
pub const COMMENTARY_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything the commentator gets to see about a finished duel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentaryRequest {
    pub max_turns: u32,
    pub final_p1: f64,
    pub final_p2: f64,
    pub weight1: f64,
    pub weight2: f64,
    pub name1: String,
    pub name2: String,
}

/// One-line end-of-game commentary provider.
#[async_trait]
pub trait CommentaryService: Send + Sync {
    async fn game_commentary(&self, request: &CommentaryRequest) -> Result<String, DuelError>;
}

/// Runs a commentary request with the boundary timeout applied. Any
/// failure, including the service never resolving, degrades to the
/// fallback line - never an error, never a retry.
pub async fn request_commentary(
    service: &dyn CommentaryService,
    request: &CommentaryRequest,
) -> String {
    match tokio::time::timeout(COMMENTARY_TIMEOUT, service.game_commentary(request)).await {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!(error = %e, "Commentary service failed, using fallback");
            FALLBACK_COMMENTARY.to_string()
        }
        Err(_) => {
            warn!(
                timeout_secs = COMMENTARY_TIMEOUT.as_secs(),
                "Commentary service timed out, using fallback"
            );
            FALLBACK_COMMENTARY.to_string()
        }
    }
}

/// Built-in commentator: a canned hype line from the final standings.
/// Keeps the demo fully offline.
#[derive(Debug, Default)]
pub struct HouseCommentary;

#[async_trait]
impl CommentaryService for HouseCommentary {
    async fn game_commentary(&self, request: &CommentaryRequest) -> Result<String, DuelError> {
        let outcome = evaluate(request.final_p1, request.final_p2);
        let text = match outcome.winner {
            Winner::Player1 => format!(
                "{} STORMS PAST {} BY {} POINTS AFTER {} BRUTAL ROUNDS!",
                request.name1, request.name2, outcome.gap, request.max_turns
            ),
            Winner::Player2 => format!(
                "{} STORMS PAST {} BY {} POINTS AFTER {} BRUTAL ROUNDS!",
                request.name2, request.name1, outcome.gap, request.max_turns
            ),
            Winner::Tie => format!(
                "UNBELIEVABLE - {} AND {} DEADLOCKED AFTER {} ROUNDS!",
                request.name1, request.name2, request.max_turns
            ),
        };
        Ok(text)
    }
}
