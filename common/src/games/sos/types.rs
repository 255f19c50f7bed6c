use std::fmt;

use super::error::{MoveError, SetupError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    S,
    O,
}

impl Symbol {
    pub const ALL: [Symbol; 2] = [Symbol::S, Symbol::O];

    pub fn as_char(&self) -> char {
        match self {
            Symbol::S => 'S',
            Symbol::O => 'O',
        }
    }
}

impl TryFrom<char> for Symbol {
    type Error = MoveError;

    fn try_from(letter: char) -> Result<Self, Self::Error> {
        match letter {
            'S' => Ok(Symbol::S),
            'O' => Ok(Symbol::O),
            other => Err(MoveError::InvalidSymbol(other)),
        }
    }
}

impl std::str::FromStr for Symbol {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => {
                Symbol::try_from(letter).map_err(|_| SetupError::InvalidSymbol(s.to_string()))
            }
            _ => Err(SetupError::InvalidSymbol(s.to_string())),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Filled(Symbol),
}

impl Cell {
    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            Cell::Empty => None,
            Cell::Filled(symbol) => Some(*symbol),
        }
    }
}

/// The two competing sides. Red always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Red,
    Blue,
}

impl Side {
    pub fn opponent(&self) -> Side {
        match self {
            Side::Red => Side::Blue,
            Side::Blue => Side::Red,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Side::Red => "Red",
            Side::Blue => "Blue",
        }
    }

    pub fn from_name(name: &str) -> Option<Side> {
        match name.trim() {
            "Red" => Some(Side::Red),
            "Blue" => Some(Side::Blue),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Simple,
    General,
}

impl Variant {
    pub fn name(&self) -> &'static str {
        match self {
            Variant::Simple => "Simple",
            Variant::General => "General",
        }
    }
}

impl std::str::FromStr for Variant {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Simple" | "simple" => Ok(Variant::Simple),
            "General" | "general" => Ok(Variant::General),
            other => Err(SetupError::UnknownVariant(other.to_string())),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A placement chosen by a player, before a side is attached to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    pub symbol: Symbol,
}

impl Placement {
    pub fn new(row: usize, col: usize, symbol: Symbol) -> Self {
        Self { row, col, symbol }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub side: Side,
    pub row: usize,
    pub col: usize,
    pub symbol: Symbol,
}

impl Move {
    pub fn new(side: Side, row: usize, col: usize, symbol: Symbol) -> Self {
        Self { side, row, col, symbol }
    }
}

/// Outer cells of one scoring S-O-S triplet, tagged with the side that formed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinLine {
    pub start: Position,
    pub end: Position,
    pub side: Side,
}

impl WinLine {
    pub fn new(start: Position, end: Position, side: Side) -> Self {
        Self { start, end, side }
    }
}
