use super::board::Board;
use super::types::{Position, Symbol, Variant};

pub type Direction = (isize, isize);

/// Full neighbourhood, in the order the Simple variant scans it:
/// up, down, left, right, up-left, down-right, up-right, down-left.
pub const ALL_DIRECTIONS: [Direction; 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
];

/// One direction per undirected axis: right, down, down-right, down-left.
/// Scanning each axis once keeps a physical line from being counted twice.
pub const FORWARD_DIRECTIONS: [Direction; 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Endpoints of a triplet that reads S-O-S.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triplet {
    pub start: Position,
    pub end: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    FirstMatch,
    AllLines,
}

pub fn scan_plan(variant: Variant) -> (&'static [Direction], ScanMode) {
    match variant {
        Variant::Simple => (&ALL_DIRECTIONS[..], ScanMode::FirstMatch),
        Variant::General => (&FORWARD_DIRECTIONS[..], ScanMode::AllLines),
    }
}

/// Lines completed by the symbol sitting at (row, col), using the scan the variant prescribes.
pub fn detect_lines(board: &Board, row: usize, col: usize, variant: Variant) -> Vec<Triplet> {
    let (directions, mode) = scan_plan(variant);
    detect_lines_with(board, row, col, directions, mode)
}

pub fn detect_lines_with(
    board: &Board,
    row: usize,
    col: usize,
    directions: &[Direction],
    mode: ScanMode,
) -> Vec<Triplet> {
    let (r, c) = (row as isize, col as isize);
    let mut found = Vec::new();

    for &(dr, dc) in directions {
        let patterns = [
            // placed cell in the middle
            [(r - dr, c - dc), (r, c), (r + dr, c + dc)],
            // placed cell first
            [(r, c), (r + dr, c + dc), (r + 2 * dr, c + 2 * dc)],
            // placed cell last
            [(r - 2 * dr, c - 2 * dc), (r - dr, c - dc), (r, c)],
        ];

        for cells in patterns {
            if let Some(triplet) = check_triplet(board, cells) {
                found.push(triplet);
                if mode == ScanMode::FirstMatch {
                    return found;
                }
            }
        }
    }

    found
}

fn check_triplet(board: &Board, cells: [(isize, isize); 3]) -> Option<Triplet> {
    let [first, middle, last] = cells;
    let is_sos = board.symbol_at(first.0, first.1) == Some(Symbol::S)
        && board.symbol_at(middle.0, middle.1) == Some(Symbol::O)
        && board.symbol_at(last.0, last.1) == Some(Symbol::S);

    if !is_sos {
        return None;
    }

    Some(Triplet {
        start: Position::new(first.0 as usize, first.1 as usize),
        end: Position::new(last.0 as usize, last.1 as usize),
    })
}
