pub mod recorder;
pub mod file_io;
pub mod player;

pub use recorder::{MoveLog, SavedGame};
pub use file_io::{
    append_move, generate_save_filename, load_game, parse_saved_game, save_game,
    save_game_to_string, save_game_with_retry, MoveLogError,
};
pub use player::ReplayPlayer;

pub const SAVE_FILE_EXTENSION: &str = "csv";
pub const MOVE_HEADER: &str = "Player,Row,Col,Letter";

#[cfg(test)]
mod integration_tests {
    use crate::games::sos::{
        replay_game, GameSettings, PlayerBinding, Side, SosController, Symbol, Variant,
    };
    use super::{parse_saved_game, save_game_to_string};

    fn controller(size: usize, variant: Variant, seed: u64) -> SosController {
        let settings = GameSettings::new(
            size,
            variant,
            PlayerBinding::computer(Symbol::S),
            PlayerBinding::computer(Symbol::O),
            seed,
        )
        .unwrap();
        SosController::new(settings).unwrap()
    }

    #[test]
    fn test_saved_computer_games_replay_identically() {
        for (variant, size, seed) in [
            (Variant::Simple, 3, 1),
            (Variant::Simple, 6, 2),
            (Variant::General, 4, 3),
            (Variant::General, 7, 4),
            (Variant::General, 12, 5),
        ] {
            let mut played = controller(size, variant, seed);
            played.try_autoplay();
            assert!(played.is_over());

            let text = save_game_to_string(&played.saved_game());
            let parsed = parse_saved_game(&text).unwrap();
            assert_eq!(parsed.moves, played.move_log().moves());

            let outcome = replay_game(&parsed).unwrap();
            assert!(outcome.is_complete(), "{:?} {} halted: {:?}", variant, size, outcome.halted);
            assert_eq!(outcome.state.scores(), played.scores());
            assert_eq!(outcome.state.board(), played.state().board());
            assert_eq!(outcome.state.win_lines(), played.state().win_lines());
            assert_eq!(outcome.state.announcement(), played.announcement());
        }
    }

    #[test]
    fn test_same_seed_replays_same_game() {
        let mut a = controller(8, Variant::General, 99);
        let mut b = controller(8, Variant::General, 99);
        a.try_autoplay();
        b.try_autoplay();
        assert_eq!(a.move_log(), b.move_log());
    }

    #[test]
    fn test_partial_log_replays_partially() {
        let mut played = controller(5, Variant::General, 8);
        played.try_autoplay();
        let mut saved = played.saved_game();
        saved.moves.truncate(10);
        saved.moves.push(saved.moves[0]);

        let outcome = replay_game(&saved).unwrap();
        assert_eq!(outcome.applied, 10);
        let halt = outcome.halted.unwrap();
        assert_eq!(halt.index, 10);
        assert_eq!(outcome.state.moves_made(), 10);
        assert!(matches!(halt.mv.side, Side::Red | Side::Blue));
    }
}
