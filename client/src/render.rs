use std::fmt::Write;

use common::games::sos::{Board, MoveEvent, SosGameState, WinLine};

/// Local copy of the board, kept in step with the move events it is fed.
pub struct BoardView {
    board: Board,
    win_lines: Vec<WinLine>,
    scores: (u32, u32),
}

impl BoardView {
    pub fn new(size: usize) -> Self {
        Self {
            board: Board::new(size),
            win_lines: Vec::new(),
            scores: (0, 0),
        }
    }

    pub fn from_state(state: &SosGameState) -> Self {
        Self {
            board: state.board().clone(),
            win_lines: state.win_lines().to_vec(),
            scores: state.scores(),
        }
    }

    pub fn apply(&mut self, event: &MoveEvent) {
        self.board.place(event.mv.row, event.mv.col, event.mv.symbol);
        self.win_lines.extend(event.lines.iter().copied());
        self.scores = event.scores;
    }

    fn in_win_line(&self, row: usize, col: usize) -> bool {
        self.win_lines.iter().any(|line| {
            let (r0, c0) = (line.start.row as isize, line.start.col as isize);
            let (r2, c2) = (line.end.row as isize, line.end.col as isize);
            let (mid_r, mid_c) = ((r0 + r2) / 2, (c0 + c2) / 2);
            let (r, c) = (row as isize, col as isize);
            (r, c) == (r0, c0) || (r, c) == (r2, c2) || (r, c) == (mid_r, mid_c)
        })
    }

    /// Cells on a formed line are shown in brackets.
    pub fn render(&self) -> String {
        let size = self.board.size();
        let mut out = String::from("    ");
        for col in 0..size {
            let _ = write!(out, "{:>3}", col);
        }
        out.push('\n');

        for (row, cells) in self.board.rows().iter().enumerate() {
            let _ = write!(out, "{:>3} ", row);
            for (col, cell) in cells.iter().enumerate() {
                let letter = cell.symbol().map(|s| s.as_char()).unwrap_or('.');
                if self.in_win_line(row, col) {
                    let _ = write!(out, "[{}]", letter);
                } else {
                    let _ = write!(out, " {} ", letter);
                }
            }
            out.push('\n');
        }

        let _ = write!(out, "Red {} : {} Blue", self.scores.0, self.scores.1);
        out
    }
}

pub fn describe_event(event: &MoveEvent) -> String {
    let mut text = format!(
        "{} placed {} at ({}, {})",
        event.mv.side, event.mv.symbol, event.mv.row, event.mv.col
    );
    if !event.lines.is_empty() {
        let _ = write!(text, " and formed {} SOS", event.lines.len());
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::games::sos::{GameSettings, PlayerBinding, SosController, Symbol, Variant};

    fn humans(size: usize) -> SosController {
        let settings = GameSettings::new(
            size,
            Variant::General,
            PlayerBinding::human(Symbol::S),
            PlayerBinding::human(Symbol::O),
            0,
        )
        .unwrap();
        SosController::new(settings).unwrap()
    }

    #[test]
    fn test_view_follows_events() {
        let mut controller = humans(3);
        let mut view = BoardView::new(3);
        for (row, col, symbol) in [(0, 0, Symbol::S), (1, 1, Symbol::O), (2, 2, Symbol::S)] {
            for event in controller.make_move(row, col, symbol).unwrap() {
                view.apply(&event);
            }
        }

        let expected = BoardView::from_state(controller.state()).render();
        assert_eq!(view.render(), expected);
        assert!(expected.contains("[S]"));
        assert!(expected.ends_with("Red 1 : 0 Blue"));
    }

    #[test]
    fn test_empty_board_layout() {
        let view = BoardView::new(3);
        let lines: Vec<String> = view.render().lines().map(str::to_string).collect();
        assert_eq!(lines[0], "      0  1  2");
        assert_eq!(lines[1], "  0  .  .  . ");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_describe_scoring_event() {
        let mut controller = humans(3);
        controller.make_move(0, 0, Symbol::S).unwrap();
        controller.make_move(0, 1, Symbol::O).unwrap();
        let events = controller.make_move(0, 2, Symbol::S).unwrap();
        assert_eq!(describe_event(&events[0]), "Red placed S at (0, 2) and formed 1 SOS");
    }
}
