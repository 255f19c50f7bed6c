use common::games::sos::Symbol;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Place { row: usize, col: usize, symbol: Option<Symbol> },
    Help,
    Quit,
}

/// Parses "row col [S|O]". Commas work as separators too, and the letter
/// is case-insensitive. Without a letter the side's default symbol is used.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => return Ok(Command::Quit),
        "h" | "help" | "?" => return Ok(Command::Help),
        _ => {}
    }

    let parts: Vec<&str> = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();

    if parts.len() < 2 || parts.len() > 3 {
        return Err("Expected: <row> <col> [S|O]".to_string());
    }

    let row = parts[0]
        .parse::<usize>()
        .map_err(|_| format!("Row must be a number, got {:?}", parts[0]))?;
    let col = parts[1]
        .parse::<usize>()
        .map_err(|_| format!("Column must be a number, got {:?}", parts[1]))?;
    let symbol = match parts.get(2) {
        Some(letter) => Some(letter.to_ascii_uppercase().parse::<Symbol>().map_err(|e| e.to_string())?),
        None => None,
    };

    Ok(Command::Place { row, col, symbol })
}

pub const HELP: &str = "Enter a move as <row> <col> [S|O], e.g. \"1 2 S\". Type \"quit\" to leave.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_move() {
        assert_eq!(
            parse_command("1 2 S"),
            Ok(Command::Place { row: 1, col: 2, symbol: Some(Symbol::S) })
        );
        assert_eq!(
            parse_command(" 0,3,o "),
            Ok(Command::Place { row: 0, col: 3, symbol: Some(Symbol::O) })
        );
    }

    #[test]
    fn test_parse_move_without_letter() {
        assert_eq!(parse_command("4 4"), Ok(Command::Place { row: 4, col: 4, symbol: None }));
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
        assert_eq!(parse_command("Q"), Ok(Command::Quit));
        assert_eq!(parse_command("help"), Ok(Command::Help));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_command("").is_err());
        assert!(parse_command("1").is_err());
        assert!(parse_command("a 1 S").is_err());
        assert!(parse_command("1 -2 S").is_err());
        assert!(parse_command("1 2 X").is_err());
        assert!(parse_command("1 2 S O").is_err());
    }
}
