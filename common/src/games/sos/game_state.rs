use super::board::Board;
use super::error::MoveError;
use super::line_detector::detect_lines;
use super::types::{Cell, Move, Side, Symbol, Variant, WinLine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    /// Simple variant only: a line was formed and the board accepts nothing more.
    Frozen,
    BoardFull,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    pub mv: Move,
    pub lines: Vec<WinLine>,
    pub next_side: Side,
    pub game_over: bool,
    pub announcement: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SosGameState {
    board: Board,
    variant: Variant,
    side_to_move: Side,
    red_score: u32,
    blue_score: u32,
    moves_made: usize,
    status: GameStatus,
    win_lines: Vec<WinLine>,
    announcement: Option<String>,
}

impl SosGameState {
    /// Size bounds are enforced by `GameSettings`; the rules work on any board of at least one cell.
    pub fn new(size: usize, variant: Variant) -> Self {
        Self {
            board: Board::new(size),
            variant,
            side_to_move: Side::Red,
            red_score: 0,
            blue_score: 0,
            moves_made: 0,
            status: GameStatus::InProgress,
            win_lines: Vec::new(),
            announcement: None,
        }
    }

    pub fn apply_move(&mut self, row: usize, col: usize, symbol: Symbol) -> Result<MoveResult, MoveError> {
        self.validate_move(row, col)?;

        let side = self.side_to_move;
        self.board.place(row, col, symbol);
        self.moves_made += 1;

        let lines: Vec<WinLine> = detect_lines(&self.board, row, col, self.variant)
            .into_iter()
            .map(|triplet| WinLine::new(triplet.start, triplet.end, side))
            .collect();
        self.win_lines.extend(lines.iter().copied());

        match self.variant {
            Variant::Simple => self.resolve_simple(side, lines.len()),
            Variant::General => self.resolve_general(side, lines.len()),
        }

        Ok(MoveResult {
            mv: Move::new(side, row, col, symbol),
            lines,
            next_side: self.side_to_move,
            game_over: self.is_over(),
            announcement: self.announcement.clone(),
        })
    }

    fn validate_move(&self, row: usize, col: usize) -> Result<(), MoveError> {
        if self.status != GameStatus::InProgress {
            return Err(MoveError::GameOver);
        }

        let size = self.board.size();
        if row >= size || col >= size {
            return Err(MoveError::OutOfBounds { row, col, size });
        }

        if self.board.get(row, col) != Some(Cell::Empty) {
            return Err(MoveError::CellOccupied { row, col });
        }

        Ok(())
    }

    fn resolve_simple(&mut self, side: Side, found: usize) {
        if found > 0 {
            self.add_score(side, found as u32);
            self.status = GameStatus::Frozen;
            self.announcement = Some(format!("Game Over! {}", self.verdict()));
            return;
        }

        if self.board.is_full() {
            self.status = GameStatus::BoardFull;
            self.announcement = Some(format!("Game Over! {}", self.verdict()));
        } else {
            self.side_to_move = side.opponent();
        }
    }

    fn resolve_general(&mut self, side: Side, found: usize) {
        let mut move_message = None;
        if found > 0 {
            self.add_score(side, found as u32);
            move_message = Some(format!("{} formed {} SOS!", side, found));
        } else {
            self.side_to_move = side.opponent();
        }

        if self.board.is_full() {
            self.status = GameStatus::BoardFull;
            let game_over = format!("Game Over! {}", self.verdict());
            self.announcement = Some(match move_message {
                Some(message) => format!("{} {}", message, game_over),
                None => game_over,
            });
        }
    }

    fn add_score(&mut self, side: Side, points: u32) {
        match side {
            Side::Red => self.red_score += points,
            Side::Blue => self.blue_score += points,
        }
    }

    fn verdict(&self) -> String {
        match self.leader() {
            Some(side) => format!("{} wins!", side),
            None => "It's a tie!".to_string(),
        }
    }

    /// Side with the higher score, `None` on a tie.
    pub fn leader(&self) -> Option<Side> {
        if self.red_score > self.blue_score {
            Some(Side::Red)
        } else if self.blue_score > self.red_score {
            Some(Side::Blue)
        } else {
            None
        }
    }

    /// Number of lines `symbol` at (row, col) would complete right now. The board is left untouched.
    pub fn preview_lines(&self, row: usize, col: usize, symbol: Symbol) -> usize {
        if !self.board.is_empty_at(row, col) {
            return 0;
        }
        let mut scratch = self.board.clone();
        preview_on(&mut scratch, row, col, symbol, self.variant)
    }

    pub fn would_score(&self, symbol: Symbol, row: usize, col: usize) -> bool {
        self.preview_lines(row, col, symbol) > 0
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Red => self.red_score,
            Side::Blue => self.blue_score,
        }
    }

    pub fn scores(&self) -> (u32, u32) {
        (self.red_score, self.blue_score)
    }

    pub fn moves_made(&self) -> usize {
        self.moves_made
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_frozen(&self) -> bool {
        self.status == GameStatus::Frozen
    }

    pub fn is_over(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    pub fn win_lines(&self) -> &[WinLine] {
        &self.win_lines
    }

    pub fn announcement(&self) -> Option<&str> {
        self.announcement.as_deref()
    }
}

/// Place, count, and restore on a scratch board. Never records lines.
pub fn preview_on(board: &mut Board, row: usize, col: usize, symbol: Symbol, variant: Variant) -> usize {
    if !board.place(row, col, symbol) {
        return 0;
    }
    let count = detect_lines(board, row, col, variant).len();
    board.clear(row, col);
    count
}
