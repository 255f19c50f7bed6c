use crate::games::SessionRng;
use super::board::Board;
use super::game_state::{SosGameState, preview_on};
use super::types::{Placement, Side, Symbol, Variant};

pub struct BotInput {
    pub board: Board,
    pub variant: Variant,
    pub side: Side,
}

impl BotInput {
    pub fn from_game_state(state: &SosGameState) -> Self {
        Self {
            board: state.board().clone(),
            variant: state.variant(),
            side: state.side_to_move(),
        }
    }

    fn opponent_view(&self) -> Self {
        Self {
            board: self.board.clone(),
            variant: self.variant,
            side: self.side.opponent(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotDecision {
    Win,
    Block,
    Random,
}

/// Look-ahead-1 heuristic: score now, else take the opponent's scoring cell, else play randomly.
pub fn calculate_move(input: BotInput, rng: &mut SessionRng) -> Option<(Placement, BotDecision)> {
    let mut board = input.board.clone();

    if let Some(placement) = find_scoring_move(&mut board, input.variant) {
        return Some((placement, BotDecision::Win));
    }

    if let Some(placement) = find_block_move(&input) {
        return Some((placement, BotDecision::Block));
    }

    calculate_random_move(&input.board, rng).map(|placement| (placement, BotDecision::Random))
}

/// First placement in row-major order, S before O, that completes at least one line.
pub fn find_scoring_move(board: &mut Board, variant: Variant) -> Option<Placement> {
    for pos in board.empty_cells() {
        for symbol in Symbol::ALL {
            if preview_on(board, pos.row, pos.col, symbol, variant) > 0 {
                return Some(Placement::new(pos.row, pos.col, symbol));
            }
        }
    }
    None
}

fn find_block_move(input: &BotInput) -> Option<Placement> {
    let mut opponent = input.opponent_view();
    find_scoring_move(&mut opponent.board, opponent.variant)
}

fn calculate_random_move(board: &Board, rng: &mut SessionRng) -> Option<Placement> {
    let empties = board.empty_cells();
    let idx = rng.random_index(empties.len())?;
    let pos = empties[idx];
    let symbol = if rng.random_bool() { Symbol::S } else { Symbol::O };
    Some(Placement::new(pos.row, pos.col, symbol))
}
