use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use strum_macros::Display;
use tokio::sync::{broadcast, watch, Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument};

use crate::commentary::{request_commentary, CommentaryRequest, CommentaryService};
use crate::duel::config::{default_players, PlayerConfig, RunConfig};
use crate::duel::growth::{apply_growth, turn_growth, RandomSource, ThreadRandom};
use crate::duel::outcome::{evaluate, Outcome};
use crate::duel::score::{PlayerSlot, ScoreHistory, ScorePoint};
use crate::event::{DuelEvent, EventBus};

/// Fixed pacing delay before each turn resolves. Purely for animation
/// feel; cancellation is observed here, so a stop never waits a full turn.
pub const TURN_DELAY: Duration = Duration::from_millis(100);

/// Externally observable lifecycle of the table. The paused flag while
/// playing is a sub-state and never changes this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum RunStatus {
    Idle,
    Playing,
    Finished,
}

struct DuelState {
    status: RunStatus,
    history: ScoreHistory,
    player1: PlayerConfig,
    player2: PlayerConfig,
    run: RunConfig,
    outcome: Option<Outcome>,
}

impl DuelState {
    fn new() -> Self {
        let (player1, player2) = default_players();
        Self {
            status: RunStatus::Idle,
            history: ScoreHistory::new(),
            player1,
            player2,
            run: RunConfig::default(),
            outcome: None,
        }
    }

    fn player_mut(&mut self, slot: PlayerSlot) -> &mut PlayerConfig {
        match slot {
            PlayerSlot::Player1 => &mut self.player1,
            PlayerSlot::Player2 => &mut self.player2,
        }
    }

    fn reset_table(&mut self) {
        self.status = RunStatus::Idle;
        self.history = ScoreHistory::reset();
        self.outcome = None;
    }
}

/// Configuration frozen at `start` for the duration of one run.
#[derive(Clone)]
struct RunParams {
    name1: String,
    name2: String,
    weight1: f64,
    weight2: f64,
    max_turns: u32,
}

/// Per-run control channels plus the loop task handle.
struct RunControls {
    paused_tx: watch::Sender<bool>,
    cancel_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Drives the duel: owns the score history for the duration of a run,
/// applies the growth law turn by turn on a spawned task, and publishes
/// snapshot events after every committed turn.
///
/// The loop task is the only writer of the history while a run is active;
/// everyone else sees cloned snapshots of fully committed turns.
pub struct DuelEngine {
    state: Arc<RwLock<DuelState>>,
    event_bus: EventBus,
    commentary: Arc<dyn CommentaryService>,
    rng: Arc<Mutex<Box<dyn RandomSource>>>,
    turn_delay: Duration,
    controls: Mutex<Option<RunControls>>,
}

impl DuelEngine {
    pub fn new(commentary: Arc<dyn CommentaryService>) -> Self {
        Self::with_random_source(commentary, Box::new(ThreadRandom))
    }

    /// Builds an engine with an injected random source so runs can be
    /// replayed deterministically.
    pub fn with_random_source(
        commentary: Arc<dyn CommentaryService>,
        source: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            state: Arc::new(RwLock::new(DuelState::new())),
            event_bus: EventBus::new(),
            commentary,
            rng: Arc::new(Mutex::new(source)),
            turn_delay: TURN_DELAY,
            controls: Mutex::new(None),
        }
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DuelEvent> {
        self.event_bus.subscribe()
    }

    pub async fn status(&self) -> RunStatus {
        self.state.read().await.status
    }

    /// Snapshot of the committed history.
    pub async fn history(&self) -> ScoreHistory {
        self.state.read().await.history.clone()
    }

    pub async fn outcome(&self) -> Option<Outcome> {
        self.state.read().await.outcome
    }

    pub async fn player_config(&self, slot: PlayerSlot) -> PlayerConfig {
        let state = self.state.read().await;
        match slot {
            PlayerSlot::Player1 => state.player1.clone(),
            PlayerSlot::Player2 => state.player2.clone(),
        }
    }

    pub async fn max_turns(&self) -> u32 {
        self.state.read().await.run.max_turns()
    }

    /// Renames a player. Honored only while idle.
    #[instrument(skip(self))]
    pub async fn set_player_name(&self, slot: PlayerSlot, name: &str) {
        let mut state = self.state.write().await;
        if state.status != RunStatus::Idle {
            debug!(status = %state.status, "Ignoring name change - duel not idle");
            return;
        }
        state.player_mut(slot).set_name(name);
    }

    /// Adjusts a player's weight, clamped to the allowed range. Honored
    /// only while idle.
    #[instrument(skip(self))]
    pub async fn set_player_weight(&self, slot: PlayerSlot, weight: f64) {
        let mut state = self.state.write().await;
        if state.status != RunStatus::Idle {
            debug!(status = %state.status, "Ignoring weight change - duel not idle");
            return;
        }
        state.player_mut(slot).set_weight(weight);
    }

    /// Sets the round count for the next run, clamped to the allowed
    /// range. Honored only while idle.
    #[instrument(skip(self))]
    pub async fn set_max_turns(&self, max_turns: u32) {
        let mut state = self.state.write().await;
        if state.status != RunStatus::Idle {
            debug!(status = %state.status, "Ignoring turn count change - duel not idle");
            return;
        }
        state.run.set_max_turns(max_turns);
    }

    /// Starts a fresh run. Only valid from idle: configs freeze, the
    /// history resets to the zero point and the turn loop spawns. Calling
    /// this while a run is active or finished is a no-op - resuming a
    /// paused run is `resume`, never `start`.
    #[instrument(skip(self))]
    pub async fn start(&self) {
        let params = {
            let mut state = self.state.write().await;
            if state.status != RunStatus::Idle {
                debug!(status = %state.status, "Ignoring start - duel not idle");
                return;
            }
            state.status = RunStatus::Playing;
            state.history = ScoreHistory::reset();
            state.outcome = None;
            RunParams {
                name1: state.player1.name().to_string(),
                name2: state.player2.name().to_string(),
                weight1: state.player1.weight(),
                weight2: state.player2.weight(),
                max_turns: state.run.max_turns(),
            }
        };

        info!(
            player1 = %params.name1,
            player2 = %params.name2,
            max_turns = params.max_turns,
            "Starting duel"
        );

        self.event_bus.publish(DuelEvent::DuelStarted {
            player1: params.name1.clone(),
            player2: params.name2.clone(),
            max_turns: params.max_turns,
        });

        let (paused_tx, paused_rx) = watch::channel(false);
        let (cancel_tx, cancel_rx) = watch::channel(false);

        let handle = tokio::spawn(run_duel_loop(
            params,
            self.state.clone(),
            self.event_bus.clone(),
            self.commentary.clone(),
            self.rng.clone(),
            self.turn_delay,
            paused_rx,
            cancel_rx,
        ));

        let mut controls = self.controls.lock().await;
        *controls = Some(RunControls {
            paused_tx,
            cancel_tx,
            handle,
        });
    }

    /// Suspends the turn loop at its next pause gate. No-op unless playing.
    #[instrument(skip(self))]
    pub async fn pause(&self) {
        if self.status().await != RunStatus::Playing {
            debug!("Ignoring pause - no duel in progress");
            return;
        }
        if let Some(controls) = self.controls.lock().await.as_ref() {
            let _ = controls.paused_tx.send(true);
            info!("Duel paused");
        }
    }

    /// Releases a paused turn loop. No-op unless playing.
    #[instrument(skip(self))]
    pub async fn resume(&self) {
        if self.status().await != RunStatus::Playing {
            debug!("Ignoring resume - no duel in progress");
            return;
        }
        if let Some(controls) = self.controls.lock().await.as_ref() {
            let _ = controls.paused_tx.send(false);
            info!("Duel resumed");
        }
    }

    /// Quits a run in progress: the loop exits at its next suspend point,
    /// remaining turns are discarded and the table resets to idle.
    #[instrument(skip(self))]
    pub async fn stop(&self) {
        if self.status().await != RunStatus::Playing {
            debug!("Ignoring stop - no duel in progress");
            return;
        }

        let controls = self.controls.lock().await.take();
        if let Some(controls) = controls {
            let _ = controls.cancel_tx.send(true);
            if let Err(e) = controls.handle.await {
                error!(error = %e, "Duel loop task failed during stop");
            }
        }

        let mut state = self.state.write().await;
        state.reset_table();
        info!("Duel stopped, table reset");
        self.event_bus.publish(DuelEvent::DuelReset);
    }

    /// Clears a finished run so configs become editable again. No-op
    /// unless finished.
    #[instrument(skip(self))]
    pub async fn new_deal(&self) {
        let mut state = self.state.write().await;
        if state.status != RunStatus::Finished {
            debug!(status = %state.status, "Ignoring new deal - duel not finished");
            return;
        }
        state.reset_table();
        info!("New deal, table reset");
        self.event_bus.publish(DuelEvent::DuelReset);
    }
}

/// One run of the duel. Sole writer of the shared history while active.
/// Cancellation is cooperative and observed only at the two suspend
/// points, so a turn that has passed them always commits in full.
#[allow(clippy::too_many_arguments)]
async fn run_duel_loop(
    params: RunParams,
    state: Arc<RwLock<DuelState>>,
    event_bus: EventBus,
    commentary: Arc<dyn CommentaryService>,
    rng: Arc<Mutex<Box<dyn RandomSource>>>,
    turn_delay: Duration,
    mut paused_rx: watch::Receiver<bool>,
    mut cancel_rx: watch::Receiver<bool>,
) {
    let mut history = ScoreHistory::reset();

    for turn in 1..=params.max_turns {
        // Suspend point: hold while paused, leave on cancellation.
        tokio::select! {
            result = paused_rx.wait_for(|paused| !*paused) => {
                if result.is_err() {
                    return;
                }
            }
            _ = cancel_rx.wait_for(|cancelled| *cancelled) => {
                debug!(turn, "Cancelled at pause gate");
                return;
            }
        }

        // Suspend point: pacing delay.
        tokio::select! {
            _ = tokio::time::sleep(turn_delay) => {}
            _ = cancel_rx.wait_for(|cancelled| *cancelled) => {
                debug!(turn, "Cancelled during turn delay");
                return;
            }
        }

        let prev = match history.latest() {
            Ok(point) => *point,
            Err(e) => {
                error!(error = %e, "Score history invariant violated, aborting run");
                return;
            }
        };

        let growth = {
            let mut source = rng.lock().await;
            turn_growth(
                turn,
                prev.player1_value,
                prev.player2_value,
                params.weight1,
                params.weight2,
                source.as_mut(),
            )
        };

        // Cue comparison is strict: an exactly equal turn routes to
        // Player2, matching the original table's behavior.
        let louder = if growth.player1 > growth.player2 {
            PlayerSlot::Player1
        } else {
            PlayerSlot::Player2
        };
        event_bus.publish(DuelEvent::ChipCue { louder });

        let point = ScorePoint::new(
            turn,
            apply_growth(prev.player1_value, growth.player1),
            apply_growth(prev.player2_value, growth.player2),
        );
        history = history.append(point);

        {
            let mut state = state.write().await;
            state.history = history.clone();
        }

        debug!(
            turn,
            player1 = point.player1_value,
            player2 = point.player2_value,
            "Turn committed"
        );
        event_bus.publish(DuelEvent::TurnCommitted {
            history: history.clone(),
            turn,
        });
    }

    let final_point = match history.latest() {
        Ok(point) => *point,
        Err(e) => {
            error!(error = %e, "Score history invariant violated at finish");
            return;
        }
    };
    let outcome = evaluate(final_point.player1_value, final_point.player2_value);

    {
        let mut state = state.write().await;
        // A stop issued while the last turn committed wins: leave the
        // reset table alone.
        if *cancel_rx.borrow() {
            return;
        }
        state.status = RunStatus::Finished;
        state.outcome = Some(outcome);
    }

    info!(winner = %outcome.winner, gap = outcome.gap, "Duel finished");
    event_bus.publish(DuelEvent::GameEnd);
    event_bus.publish(DuelEvent::DuelFinished { outcome });

    // Fire-and-forget: the request starts only after the status flipped to
    // finished, and its result only ever becomes display text.
    let request = CommentaryRequest {
        max_turns: params.max_turns,
        final_p1: final_point.player1_value,
        final_p2: final_point.player2_value,
        weight1: params.weight1,
        weight2: params.weight2,
        name1: params.name1,
        name2: params.name2,
    };
    tokio::spawn(async move {
        let text = request_commentary(commentary.as_ref(), &request).await;
        event_bus.publish(DuelEvent::Commentary { text });
    });
}
