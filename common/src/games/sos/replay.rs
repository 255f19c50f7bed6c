use std::time::Duration;
use tokio::sync::mpsc;

use crate::log;
use crate::replay::{ReplayPlayer, SavedGame};
use super::controller::{MoveEvent, SosController};
use super::error::{MoveError, SetupError};
use super::game_state::SosGameState;
use super::settings::{DEFAULT_GRID_SIZE, GameSettings, MAX_GRID_SIZE, MIN_GRID_SIZE, PlayerBinding};
use super::types::{Move, Symbol, Variant};

pub enum ReplayCommand {
    Pause,
    Resume,
    Stop,
    SetSpeed(f32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayHalt {
    pub index: usize,
    pub mv: Move,
    pub error: MoveError,
}

#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    pub applied: usize,
    pub total: usize,
    pub halted: Option<ReplayHalt>,
    pub stopped: bool,
    pub state: SosGameState,
    /// Scores written in the file, for comparison with `state.scores()`.
    pub recorded_scores: (u32, u32),
}

impl ReplayOutcome {
    pub fn is_complete(&self) -> bool {
        self.halted.is_none() && !self.stopped && self.applied == self.total
    }
}

/// Settings for a replay: two Human sides so nothing moves on its own.
/// Missing or out-of-range metadata falls back to defaults.
pub fn replay_settings(saved: &SavedGame) -> GameSettings {
    let grid_size = saved
        .grid_size
        .filter(|size| (MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(size))
        .unwrap_or(DEFAULT_GRID_SIZE);

    GameSettings {
        grid_size,
        variant: saved.variant.unwrap_or(Variant::Simple),
        red: PlayerBinding::human(Symbol::S),
        blue: PlayerBinding::human(Symbol::O),
        seed: 0,
    }
}

struct ReplayRun {
    player: ReplayPlayer,
    controller: SosController,
    applied: usize,
    halted: Option<ReplayHalt>,
}

impl ReplayRun {
    fn new(saved: &SavedGame, events: Option<mpsc::UnboundedSender<MoveEvent>>) -> Result<Self, SetupError> {
        let mut controller = SosController::new(replay_settings(saved))?;
        if let Some(tx) = events {
            controller.attach(tx);
        }
        Ok(Self {
            player: ReplayPlayer::new(saved.clone()),
            controller,
            applied: 0,
            halted: None,
        })
    }

    /// Applies the next recorded move. Returns false once there is nothing left to apply.
    fn step(&mut self) -> bool {
        if self.halted.is_some() || self.player.is_finished() {
            return false;
        }
        let index = self.player.current_move_index();
        let Some(mv) = self.player.next_move().copied() else {
            return false;
        };

        match self.controller.replay_move(&mv) {
            Ok(_) => {
                self.applied += 1;
                true
            }
            Err(error) => {
                log!(
                    "[replay] Halted at move {} ({} {} at ({}, {})): {}",
                    index + 1,
                    mv.side,
                    mv.symbol,
                    mv.row,
                    mv.col,
                    error
                );
                self.halted = Some(ReplayHalt { index, mv, error });
                false
            }
        }
    }

    fn finish(self, stopped: bool) -> ReplayOutcome {
        ReplayOutcome {
            applied: self.applied,
            total: self.player.total_moves(),
            halted: self.halted,
            stopped,
            state: self.controller.state().clone(),
            recorded_scores: self.player.recorded_scores(),
        }
    }
}

/// Headless replay: every recorded move is fed through a fresh controller
/// without pacing. A rejected move ends the replay and is reported in the outcome.
pub fn replay_game(saved: &SavedGame) -> Result<ReplayOutcome, SetupError> {
    let mut run = ReplayRun::new(saved, None)?;
    while run.step() {}
    Ok(run.finish(false))
}

/// Replay for presentation. Waits `delay` between moves and forwards each
/// applied move to `events`. `commands` can pause, resume, change speed, or stop.
pub async fn replay_game_paced(
    saved: &SavedGame,
    delay: Duration,
    events: mpsc::UnboundedSender<MoveEvent>,
    commands: &mut mpsc::UnboundedReceiver<ReplayCommand>,
) -> Result<ReplayOutcome, SetupError> {
    let mut run = ReplayRun::new(saved, Some(events))?;
    let mut move_delay = delay;
    let mut is_paused = false;
    let mut commands_open = true;

    loop {
        tokio::select! {
            _ = tokio::time::sleep(move_delay), if !is_paused => {
                if !run.step() {
                    break;
                }
            }
            cmd = commands.recv(), if commands_open => {
                match cmd {
                    Some(ReplayCommand::Pause) => is_paused = true,
                    Some(ReplayCommand::Resume) => is_paused = false,
                    Some(ReplayCommand::Stop) => {
                        log!("[replay] Stopped after {} moves", run.applied);
                        return Ok(run.finish(true));
                    }
                    Some(ReplayCommand::SetSpeed(speed)) if speed.is_finite() => {
                        move_delay = delay.div_f32(speed.clamp(0.25, 4.0));
                    }
                    Some(ReplayCommand::SetSpeed(speed)) => {
                        log!("[replay] Ignoring speed {}", speed);
                    }
                    None => {
                        commands_open = false;
                        is_paused = false;
                    }
                }
            }
        }
    }

    Ok(run.finish(false))
}
