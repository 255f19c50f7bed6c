use crate::games::sos::Move;
use super::recorder::SavedGame;

/// Cursor over the moves of a loaded game.
pub struct ReplayPlayer {
    saved: SavedGame,
    current_move_index: usize,
}

impl ReplayPlayer {
    pub fn new(saved: SavedGame) -> Self {
        Self {
            saved,
            current_move_index: 0,
        }
    }

    /// Scores as written in the file, not as recomputed by replaying.
    pub fn recorded_scores(&self) -> (u32, u32) {
        (self.saved.red_score, self.saved.blue_score)
    }

    pub fn total_moves(&self) -> usize {
        self.saved.moves.len()
    }

    pub fn current_move_index(&self) -> usize {
        self.current_move_index
    }

    pub fn is_finished(&self) -> bool {
        self.current_move_index >= self.saved.moves.len()
    }

    pub fn next_move(&mut self) -> Option<&Move> {
        let mv = self.saved.moves.get(self.current_move_index)?;
        self.current_move_index += 1;
        Some(mv)
    }
}
