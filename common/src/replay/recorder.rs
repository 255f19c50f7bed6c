use crate::games::sos::{Move, SosGameState, Variant};

/// Everything a save file holds: final scores, metadata, and the ordered moves.
/// Metadata is optional because a reader may meet a file with those lines
/// missing or malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedGame {
    pub red_score: u32,
    pub blue_score: u32,
    pub grid_size: Option<usize>,
    pub variant: Option<Variant>,
    pub player_mode: Option<String>,
    pub moves: Vec<Move>,
}

/// Ordered record of accepted moves, appended by the controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveLog {
    moves: Vec<Move>,
}

impl MoveLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn finalize(&self, state: &SosGameState, player_mode: String) -> SavedGame {
        let (red_score, blue_score) = state.scores();
        SavedGame {
            red_score,
            blue_score,
            grid_size: Some(state.board().size()),
            variant: Some(state.variant()),
            player_mode: Some(player_mode),
            moves: self.moves.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::sos::{Side, Symbol};

    #[test]
    fn test_records_in_order() {
        let mut log = MoveLog::new();
        assert!(log.is_empty());
        log.record(Move::new(Side::Red, 0, 0, Symbol::S));
        log.record(Move::new(Side::Blue, 1, 1, Symbol::O));
        assert_eq!(log.len(), 2);
        assert_eq!(log.moves()[0].side, Side::Red);
        assert_eq!(log.moves()[1], Move::new(Side::Blue, 1, 1, Symbol::O));
    }

    #[test]
    fn test_finalize_captures_state() {
        let mut state = SosGameState::new(4, Variant::General);
        let mut log = MoveLog::new();
        for (row, col, symbol) in [(0, 0, Symbol::S), (0, 1, Symbol::O), (0, 2, Symbol::S)] {
            let result = state.apply_move(row, col, symbol).unwrap();
            log.record(result.mv);
        }

        let saved = log.finalize(&state, "Red: Human, Blue: Human".to_string());
        assert_eq!(saved.grid_size, Some(4));
        assert_eq!(saved.variant, Some(Variant::General));
        assert_eq!((saved.red_score, saved.blue_score), state.scores());
        assert_eq!(saved.moves, log.moves());
    }
}
