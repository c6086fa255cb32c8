use async_trait::async_trait;

use bada::{CommentaryRequest, CommentaryService, DuelError, RandomSource};

/// Replays a fixed sequence of draws, then repeats the last one. Two
/// sources built from the same sequence reproduce identical runs.
pub struct FixedSequence {
    draws: Vec<f64>,
    next: usize,
}

impl FixedSequence {
    pub fn new(draws: Vec<f64>) -> Self {
        Self { draws, next: 0 }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for FixedSequence {
    fn sample(&mut self) -> f64 {
        let draw = self.draws[self.next.min(self.draws.len() - 1)];
        self.next += 1;
        draw
    }
}

/// Commentary backend that always fails.
pub struct FailingCommentary;

#[async_trait]
impl CommentaryService for FailingCommentary {
    async fn game_commentary(&self, _request: &CommentaryRequest) -> Result<String, DuelError> {
        Err(DuelError::CommentaryUnavailable(
            "backend unreachable".to_string(),
        ))
    }
}

/// Commentary backend that never resolves, for timeout coverage.
pub struct NeverResolves;

#[async_trait]
impl CommentaryService for NeverResolves {
    async fn game_commentary(&self, _request: &CommentaryRequest) -> Result<String, DuelError> {
        std::future::pending().await
    }
}

/// Commentary backend that echoes the request, for asserting the engine
/// hands the collaborator the frozen run parameters.
pub struct EchoCommentary;

#[async_trait]
impl CommentaryService for EchoCommentary {
    async fn game_commentary(&self, request: &CommentaryRequest) -> Result<String, DuelError> {
        Ok(format!(
            "{} {:.2} vs {} {:.2} over {} turns",
            request.name1, request.final_p1, request.name2, request.final_p2, request.max_turns
        ))
    }
}
