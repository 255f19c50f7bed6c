use crate::games::SessionRng;
use crate::log;
use super::bot_controller::{BotDecision, BotInput, calculate_move};
use super::error::PlayerError;
use super::game_state::SosGameState;
use super::types::{Placement, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Computer,
}

impl PlayerKind {
    pub fn name(&self) -> &'static str {
        match self {
            PlayerKind::Human => "Human",
            PlayerKind::Computer => "Computer",
        }
    }
}

/// A side's move source. The controller asks only automated players for moves;
/// human moves arrive from outside through `SosController::make_move`.
pub trait GamePlayer: Send {
    fn next_move(&mut self, state: &SosGameState) -> Result<Placement, PlayerError>;

    fn default_symbol(&self) -> Symbol;

    fn kind(&self) -> PlayerKind;

    fn is_automated(&self) -> bool {
        self.kind() == PlayerKind::Computer
    }
}

pub struct HumanPlayer {
    default_symbol: Symbol,
}

impl HumanPlayer {
    pub fn new(default_symbol: Symbol) -> Self {
        Self { default_symbol }
    }
}

impl GamePlayer for HumanPlayer {
    fn next_move(&mut self, state: &SosGameState) -> Result<Placement, PlayerError> {
        Err(PlayerError::HumanInputRequired(state.side_to_move()))
    }

    fn default_symbol(&self) -> Symbol {
        self.default_symbol
    }

    fn kind(&self) -> PlayerKind {
        PlayerKind::Human
    }
}

pub struct ComputerPlayer {
    default_symbol: Symbol,
    rng: SessionRng,
}

impl ComputerPlayer {
    pub fn new(default_symbol: Symbol, rng: SessionRng) -> Self {
        Self { default_symbol, rng }
    }
}

impl GamePlayer for ComputerPlayer {
    fn next_move(&mut self, state: &SosGameState) -> Result<Placement, PlayerError> {
        let input = BotInput::from_game_state(state);
        let side = input.side;
        let (placement, decision) =
            calculate_move(input, &mut self.rng).ok_or(PlayerError::NoEmptyCell)?;

        if decision != BotDecision::Random {
            log!(
                "[computer:{}] {:?} at ({}, {}) with {}",
                side,
                decision,
                placement.row,
                placement.col,
                placement.symbol
            );
        }
        Ok(placement)
    }

    fn default_symbol(&self) -> Symbol {
        self.default_symbol
    }

    fn kind(&self) -> PlayerKind {
        PlayerKind::Computer
    }
}
