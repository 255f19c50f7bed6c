mod board;
mod bot_controller;
mod controller;
mod error;
mod game_state;
mod line_detector;
mod player;
mod replay;
mod session;
mod settings;
mod types;

pub use board::Board;
pub use bot_controller::{calculate_move, find_scoring_move, BotDecision, BotInput};
pub use controller::{MoveEvent, SosController};
pub use error::{MoveError, PlayerError, SetupError};
pub use game_state::{GameStatus, MoveResult, SosGameState};
pub use line_detector::{detect_lines, Triplet};
pub use player::{ComputerPlayer, GamePlayer, HumanPlayer, PlayerKind};
pub use replay::{replay_game, replay_game_paced, replay_settings, ReplayCommand, ReplayHalt, ReplayOutcome};
pub use session::GameSession;
pub use settings::{GameSettings, PlayerBinding, DEFAULT_GRID_SIZE, MAX_GRID_SIZE, MIN_GRID_SIZE};
pub use types::{Cell, Move, Placement, Position, Side, Symbol, Variant, WinLine};
