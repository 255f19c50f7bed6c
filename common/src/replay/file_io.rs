use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use crate::games::sos::{Move, Side, Symbol, Variant};
use crate::log;
use super::recorder::SavedGame;
use super::{MOVE_HEADER, SAVE_FILE_EXTENSION};

#[derive(Debug)]
pub enum MoveLogError {
    Io(std::io::Error),
    Parse(String),
    RetriesExhausted { attempts: u32, last: std::io::Error },
}

impl std::fmt::Display for MoveLogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveLogError::Io(e) => write!(f, "IO error: {}", e),
            MoveLogError::Parse(message) => write!(f, "Malformed save file: {}", message),
            MoveLogError::RetriesExhausted { attempts, last } => {
                write!(f, "Save failed after {} attempts: {}", attempts, last)
            }
        }
    }
}

impl std::error::Error for MoveLogError {}

impl From<std::io::Error> for MoveLogError {
    fn from(e: std::io::Error) -> Self {
        MoveLogError::Io(e)
    }
}

fn move_line(mv: &Move) -> String {
    format!("{},{},{},{}\n", mv.side, mv.row, mv.col, mv.symbol)
}

pub fn save_game_to_string(saved: &SavedGame) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{},{},{}", Side::Red, saved.red_score, Side::Red);
    let _ = writeln!(out, "{},{},{}", Side::Blue, saved.blue_score, Side::Blue);
    out.push('\n');

    if let Some(size) = saved.grid_size {
        let _ = writeln!(out, "GridSize,{}", size);
    }
    if let Some(variant) = saved.variant {
        let _ = writeln!(out, "GameMode,{}", variant);
    }
    if let Some(ref mode) = saved.player_mode {
        let _ = writeln!(out, "PlayerMode,{}", mode);
    }
    out.push('\n');

    out.push_str(MOVE_HEADER);
    out.push('\n');
    for mv in &saved.moves {
        out.push_str(&move_line(mv));
    }
    out
}

fn parse_move(line: &str) -> Option<Move> {
    let mut fields = line.split(',').map(str::trim);
    let side = Side::from_name(fields.next()?)?;
    let row = fields.next()?.parse().ok()?;
    let col = fields.next()?.parse().ok()?;
    let symbol = fields.next()?.parse::<Symbol>().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some(Move::new(side, row, col, symbol))
}

/// Reads the save format. Tolerates a writer that is still appending: a last
/// line without its newline is ignored. Unreadable metadata is dropped, and
/// the move list ends at the first move line that does not parse.
pub fn parse_saved_game(content: &str) -> Result<SavedGame, MoveLogError> {
    let complete = match content.rfind('\n') {
        Some(end) => &content[..=end],
        None => "",
    };

    let mut saved = SavedGame {
        red_score: 0,
        blue_score: 0,
        grid_size: None,
        variant: None,
        player_mode: None,
        moves: Vec::new(),
    };
    let mut in_moves = false;

    for (index, raw) in complete.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if in_moves {
            match parse_move(line) {
                Some(mv) => saved.moves.push(mv),
                None => {
                    log!("[save] Move list ends at malformed line {}: {:?}", index + 1, line);
                    break;
                }
            }
            continue;
        }

        if line == MOVE_HEADER {
            in_moves = true;
            continue;
        }

        let (key, value) = match line.split_once(',') {
            Some((key, value)) => (key.trim(), value.trim()),
            None => continue,
        };

        match key {
            "GridSize" => saved.grid_size = value.parse().ok(),
            "GameMode" => saved.variant = value.parse::<Variant>().ok(),
            "PlayerMode" => saved.player_mode = Some(value.to_string()),
            _ => {
                let Some(side) = Side::from_name(key) else {
                    continue;
                };
                let score = value.split(',').next().and_then(|s| s.trim().parse::<u32>().ok());
                match (side, score) {
                    (Side::Red, Some(score)) => saved.red_score = score,
                    (Side::Blue, Some(score)) => saved.blue_score = score,
                    _ => {}
                }
            }
        }
    }

    if !in_moves {
        return Err(MoveLogError::Parse(format!("missing \"{}\" header", MOVE_HEADER)));
    }

    Ok(saved)
}

pub fn save_game(path: &Path, saved: &SavedGame) -> Result<(), MoveLogError> {
    std::fs::write(path, save_game_to_string(saved))?;
    Ok(())
}

pub fn load_game(path: &Path) -> Result<SavedGame, MoveLogError> {
    let content = std::fs::read_to_string(path)?;
    parse_saved_game(&content)
}

/// Appends one move line to an existing save file.
pub fn append_move(path: &Path, mv: &Move) -> Result<(), MoveLogError> {
    let mut file = std::fs::OpenOptions::new().append(true).open(path)?;
    file.write_all(move_line(mv).as_bytes())?;
    Ok(())
}

/// Retries `save_game` with doubling backoff. Only the last failure is reported.
pub async fn save_game_with_retry(
    path: &Path,
    saved: &SavedGame,
    attempts: u32,
    backoff: Duration,
) -> Result<(), MoveLogError> {
    let attempts = attempts.max(1);
    let mut delay = backoff;
    let mut attempt = 1;

    loop {
        match save_game(path, saved) {
            Ok(()) => return Ok(()),
            Err(MoveLogError::Io(e)) if attempt < attempts => {
                log!(
                    "[save] Attempt {}/{} to write {} failed: {}",
                    attempt,
                    attempts,
                    path.display(),
                    e
                );
                tokio::time::sleep(delay).await;
                delay = delay.saturating_mul(2);
                attempt += 1;
            }
            Err(MoveLogError::Io(last)) => {
                return Err(MoveLogError::RetriesExhausted { attempts, last });
            }
            Err(other) => return Err(other),
        }
    }
}

pub fn generate_save_filename(variant: Variant) -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d%H%M%S");
    let mode = variant.name().to_ascii_uppercase();
    format!("{}_SOS_{}.{}", timestamp, mode, SAVE_FILE_EXTENSION)
}
