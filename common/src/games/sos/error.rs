use super::types::Side;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    OutOfBounds { row: usize, col: usize, size: usize },
    CellOccupied { row: usize, col: usize },
    InvalidSymbol(char),
    GameOver,
    NotHumanTurn(Side),
    WrongSide { expected: Side, found: Side },
}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveError::OutOfBounds { row, col, size } => {
                write!(f, "Position ({}, {}) is outside the {}x{} board", row, col, size, size)
            }
            MoveError::CellOccupied { row, col } => {
                write!(f, "Cell ({}, {}) is already filled", row, col)
            }
            MoveError::InvalidSymbol(letter) => {
                write!(f, "Symbol must be 'S' or 'O', got {:?}", letter)
            }
            MoveError::GameOver => write!(f, "Game is already over"),
            MoveError::NotHumanTurn(side) => {
                write!(f, "{} is controlled by the computer", side)
            }
            MoveError::WrongSide { expected, found } => {
                write!(f, "Move belongs to {}, but {} is to move", found, expected)
            }
        }
    }
}

impl std::error::Error for MoveError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    GridSizeOutOfRange { size: usize, min: usize, max: usize },
    UnknownVariant(String),
    InvalidSymbol(String),
    UnknownPlayerKind(String),
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::GridSizeOutOfRange { size, min, max } => {
                write!(f, "Board size must be between {} and {}, got {}", min, max, size)
            }
            SetupError::UnknownVariant(name) => {
                write!(f, "Unknown game mode {:?}, expected Simple or General", name)
            }
            SetupError::InvalidSymbol(value) => {
                write!(f, "Letter must be 'S' or 'O', got {:?}", value)
            }
            SetupError::UnknownPlayerKind(value) => {
                write!(f, "Unknown player kind {:?}, expected human or computer", value)
            }
        }
    }
}

impl std::error::Error for SetupError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerError {
    HumanInputRequired(Side),
    NoEmptyCell,
}

impl std::fmt::Display for PlayerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerError::HumanInputRequired(side) => {
                write!(f, "{} is a human player, moves must be submitted by the UI", side)
            }
            PlayerError::NoEmptyCell => write!(f, "No empty cell left to play"),
        }
    }
}

impl std::error::Error for PlayerError {}
