use tokio::sync::mpsc;

use crate::log;
use crate::replay::{MoveLog, SavedGame};
use super::error::{MoveError, SetupError};
use super::game_state::SosGameState;
use super::player::GamePlayer;
use super::settings::GameSettings;
use super::types::{Move, Side, Symbol, WinLine};

/// Sent to every subscriber after each accepted placement, human or computer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveEvent {
    pub mv: Move,
    pub lines: Vec<WinLine>,
    pub scores: (u32, u32),
    pub next_side: Side,
    pub game_over: bool,
    pub announcement: Option<String>,
}

pub struct SosController {
    settings: GameSettings,
    state: SosGameState,
    red: Box<dyn GamePlayer>,
    blue: Box<dyn GamePlayer>,
    move_log: MoveLog,
    subscribers: Vec<mpsc::UnboundedSender<MoveEvent>>,
}

impl SosController {
    pub fn new(settings: GameSettings) -> Result<Self, SetupError> {
        settings.validate()?;

        let red = settings.red.create_player(settings.seed);
        let blue = settings.blue.create_player(settings.seed.wrapping_add(1));
        let state = SosGameState::new(settings.grid_size, settings.variant);

        log!(
            "New {} game on {}x{} board ({})",
            settings.variant,
            settings.grid_size,
            settings.grid_size,
            settings.player_mode()
        );

        Ok(Self {
            settings,
            state,
            red,
            blue,
            move_log: MoveLog::new(),
            subscribers: Vec::new(),
        })
    }

    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<MoveEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.attach(tx);
        rx
    }

    pub fn attach(&mut self, subscriber: mpsc::UnboundedSender<MoveEvent>) {
        self.subscribers.push(subscriber);
    }

    /// Human move followed by any computer turns it hands over to.
    /// Returns the event of every placement made, the human one first.
    pub fn make_move(&mut self, row: usize, col: usize, symbol: Symbol) -> Result<Vec<MoveEvent>, MoveError> {
        let event = self.apply_human_move(row, col, symbol)?;
        let mut events = vec![event];
        events.extend(self.try_autoplay());
        Ok(events)
    }

    pub fn make_move_letter(&mut self, row: usize, col: usize, letter: char) -> Result<Vec<MoveEvent>, MoveError> {
        let symbol = Symbol::try_from(letter)?;
        self.make_move(row, col, symbol)
    }

    /// Applies a human move without running the computer afterwards.
    pub fn apply_human_move(&mut self, row: usize, col: usize, symbol: Symbol) -> Result<MoveEvent, MoveError> {
        if self.state.is_over() {
            return Err(MoveError::GameOver);
        }

        let side = self.state.side_to_move();
        if self.player(side).is_automated() {
            return Err(MoveError::NotHumanTurn(side));
        }

        self.apply(row, col, symbol)
    }

    /// Replays a recorded move. The recorded side must be the side to move.
    pub fn replay_move(&mut self, mv: &Move) -> Result<MoveEvent, MoveError> {
        let expected = self.state.side_to_move();
        if !self.state.is_over() && mv.side != expected {
            return Err(MoveError::WrongSide { expected, found: mv.side });
        }
        self.apply_human_move(mv.row, mv.col, mv.symbol)
    }

    pub fn is_computer_turn(&self) -> bool {
        !self.state.is_over() && self.player(self.state.side_to_move()).is_automated()
    }

    /// One automated move, or `None` when the game is over or a human is to move.
    pub fn play_computer_turn(&mut self) -> Option<MoveEvent> {
        if !self.is_computer_turn() {
            return None;
        }

        let side = self.state.side_to_move();
        let player = match side {
            Side::Red => &mut self.red,
            Side::Blue => &mut self.blue,
        };
        let placement = match player.next_move(&self.state) {
            Ok(placement) => placement,
            Err(e) => {
                log!("[controller] {} could not choose a move: {}", side, e);
                return None;
            }
        };

        match self.apply(placement.row, placement.col, placement.symbol) {
            Ok(event) => Some(event),
            Err(e) => {
                log!(
                    "[controller] {} failed to place {} at ({}, {}): {}",
                    side,
                    placement.symbol,
                    placement.row,
                    placement.col,
                    e
                );
                None
            }
        }
    }

    /// Runs computer turns until a human is to move or the game ends.
    /// Bounded by board capacity, since every accepted move fills a cell.
    pub fn try_autoplay(&mut self) -> Vec<MoveEvent> {
        let mut events = Vec::new();
        for _ in 0..self.state.board().capacity() {
            match self.play_computer_turn() {
                Some(event) => events.push(event),
                None => break,
            }
        }
        events
    }

    fn apply(&mut self, row: usize, col: usize, symbol: Symbol) -> Result<MoveEvent, MoveError> {
        let result = self.state.apply_move(row, col, symbol)?;
        self.move_log.record(result.mv);

        let event = MoveEvent {
            mv: result.mv,
            lines: result.lines,
            scores: self.state.scores(),
            next_side: result.next_side,
            game_over: result.game_over,
            announcement: result.announcement,
        };

        if let Some(ref announcement) = event.announcement {
            log!("[controller] {}", announcement);
        }

        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        Ok(event)
    }

    fn player(&self, side: Side) -> &dyn GamePlayer {
        match side {
            Side::Red => self.red.as_ref(),
            Side::Blue => self.blue.as_ref(),
        }
    }

    pub fn state(&self) -> &SosGameState {
        &self.state
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn move_log(&self) -> &MoveLog {
        &self.move_log
    }

    pub fn saved_game(&self) -> SavedGame {
        self.move_log.finalize(&self.state, self.settings.player_mode())
    }

    pub fn side_to_move(&self) -> Side {
        self.state.side_to_move()
    }

    pub fn scores(&self) -> (u32, u32) {
        self.state.scores()
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn announcement(&self) -> Option<&str> {
        self.state.announcement()
    }

    pub fn default_symbol(&self, side: Side) -> Symbol {
        self.player(side).default_symbol()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::sos::settings::PlayerBinding;
    use crate::games::sos::types::{Cell, Variant};

    fn controller(size: usize, variant: Variant, red: PlayerBinding, blue: PlayerBinding) -> SosController {
        SosController::new(GameSettings::new(size, variant, red, blue, 1234).unwrap()).unwrap()
    }

    fn two_humans(size: usize, variant: Variant) -> SosController {
        controller(size, variant, PlayerBinding::human(Symbol::S), PlayerBinding::human(Symbol::O))
    }

    #[test]
    fn test_invalid_grid_size_is_rejected() {
        let settings = GameSettings {
            grid_size: 2,
            variant: Variant::Simple,
            red: PlayerBinding::human(Symbol::S),
            blue: PlayerBinding::human(Symbol::O),
            seed: 0,
        };
        assert!(matches!(
            SosController::new(settings),
            Err(SetupError::GridSizeOutOfRange { size: 2, .. })
        ));
    }

    #[test]
    fn test_turn_switches_between_humans() {
        let mut controller = two_humans(5, Variant::Simple);
        let first = controller.side_to_move();
        let events = controller.make_move(0, 0, Symbol::S).unwrap();
        assert_eq!(events.len(), 1);
        assert_ne!(first, controller.side_to_move());
    }

    #[test]
    fn test_invalid_letter_is_rejected_without_mutation() {
        let mut controller = two_humans(5, Variant::General);
        for letter in ['X', 'A', '1', '\0', 's'] {
            assert_eq!(
                controller.make_move_letter(0, 0, letter),
                Err(MoveError::InvalidSymbol(letter))
            );
        }
        assert_eq!(controller.state().board().get(0, 0), Some(Cell::Empty));
        assert_eq!(controller.state().moves_made(), 0);
        assert!(controller.move_log().is_empty());
    }

    #[test]
    fn test_move_rejected_when_computer_is_to_move() {
        let mut controller = controller(
            3,
            Variant::Simple,
            PlayerBinding::computer(Symbol::S),
            PlayerBinding::human(Symbol::O),
        );
        assert_eq!(
            controller.make_move(0, 0, Symbol::S),
            Err(MoveError::NotHumanTurn(Side::Red))
        );
        assert_eq!(controller.state().moves_made(), 0);
    }

    #[test]
    fn test_events_fire_for_human_and_computer_moves() {
        let mut controller = controller(
            3,
            Variant::Simple,
            PlayerBinding::human(Symbol::S),
            PlayerBinding::computer(Symbol::O),
        );
        let mut rx = controller.subscribe();

        let returned = controller.make_move(0, 0, Symbol::S).unwrap();

        let mut received = Vec::new();
        while let Ok(event) = rx.try_recv() {
            received.push(event);
        }
        assert!(received.len() >= 2);
        assert_eq!(received, returned);
        assert_eq!(received[0].mv, Move::new(Side::Red, 0, 0, Symbol::S));
        assert_eq!(received[1].mv.side, Side::Blue);

        for event in &received {
            assert_ne!(controller.state().board().get(event.mv.row, event.mv.col), Some(Cell::Empty));
        }
        assert_eq!(controller.move_log().len(), received.len());
    }

    #[test]
    fn test_computer_vs_computer_simple_runs_to_completion() {
        let mut controller = controller(
            3,
            Variant::Simple,
            PlayerBinding::computer(Symbol::S),
            PlayerBinding::computer(Symbol::O),
        );
        let events = controller.try_autoplay();

        assert!(!events.is_empty());
        assert!(controller.is_over());
        assert!(events.last().unwrap().game_over);
        assert_eq!(events.len(), controller.state().moves_made());
        if controller.state().is_frozen() {
            assert_eq!(controller.scores().0 + controller.scores().1, 1);
        }
    }

    #[test]
    fn test_computer_vs_computer_general_fills_board() {
        for size in [3, 4, 6] {
            let mut controller = controller(
                size,
                Variant::General,
                PlayerBinding::computer(Symbol::S),
                PlayerBinding::computer(Symbol::O),
            );
            let events = controller.try_autoplay();
            assert_eq!(events.len(), size * size);
            assert!(controller.is_over());
            assert!(controller.state().board().is_full());
            assert!(controller.announcement().is_some());
        }
    }

    #[test]
    fn test_autoplay_stops_at_human_turn() {
        let mut controller = controller(
            5,
            Variant::General,
            PlayerBinding::computer(Symbol::S),
            PlayerBinding::human(Symbol::O),
        );
        let events = controller.try_autoplay();
        assert!(!events.is_empty());
        assert!(events.iter().all(|e| e.mv.side == Side::Red));
        assert_eq!(controller.side_to_move(), Side::Blue);
        assert!(!controller.is_computer_turn());
        assert!(controller.try_autoplay().is_empty());
    }

    #[test]
    fn test_no_moves_after_simple_game_freezes() {
        let mut controller = two_humans(5, Variant::Simple);
        controller.make_move(0, 2, Symbol::S).unwrap();
        controller.make_move(1, 2, Symbol::O).unwrap();
        let events = controller.make_move(2, 2, Symbol::S).unwrap();
        assert!(events[0].game_over);
        assert_eq!(controller.make_move(4, 4, Symbol::O), Err(MoveError::GameOver));
        assert_eq!(controller.move_log().len(), 3);
    }

    #[test]
    fn test_replay_move_checks_side() {
        let mut controller = two_humans(4, Variant::General);
        let wrong = Move::new(Side::Blue, 0, 0, Symbol::S);
        assert_eq!(
            controller.replay_move(&wrong),
            Err(MoveError::WrongSide { expected: Side::Red, found: Side::Blue })
        );
        let right = Move::new(Side::Red, 0, 0, Symbol::S);
        assert!(controller.replay_move(&right).is_ok());
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let mut controller = two_humans(3, Variant::Simple);
        let rx = controller.subscribe();
        drop(rx);
        let mut live = controller.subscribe();
        controller.make_move(1, 1, Symbol::O).unwrap();
        assert!(live.try_recv().is_ok());
        assert_eq!(controller.subscribers.len(), 1);
    }
}
