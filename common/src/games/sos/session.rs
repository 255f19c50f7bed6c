use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::{mpsc, Mutex, Notify};

use crate::log;
use super::controller::{MoveEvent, SosController};
use super::error::{MoveError, SetupError};
use super::game_state::SosGameState;
use super::settings::GameSettings;
use super::types::Symbol;

/// Async host for one game. Human moves come in through `submit_human_move`,
/// computer turns are paced by `run`. Starting a new game means cancelling
/// this session and creating another.
#[derive(Clone)]
pub struct GameSession {
    controller: Arc<Mutex<SosController>>,
    wake: Arc<Notify>,
    cancelled: Arc<AtomicBool>,
    autoplay_delay: Duration,
}

impl GameSession {
    pub fn new(settings: GameSettings, autoplay_delay: Duration) -> Result<Self, SetupError> {
        let controller = SosController::new(settings)?;
        Ok(Self {
            controller: Arc::new(Mutex::new(controller)),
            wake: Arc::new(Notify::new()),
            cancelled: Arc::new(AtomicBool::new(false)),
            autoplay_delay,
        })
    }

    /// Cancels this session and starts a replacement with the same pacing.
    pub fn new_game(&self, settings: GameSettings) -> Result<GameSession, SetupError> {
        let next = GameSession::new(settings, self.autoplay_delay)?;
        self.cancel();
        Ok(next)
    }

    pub async fn subscribe(&self) -> mpsc::UnboundedReceiver<MoveEvent> {
        self.controller.lock().await.subscribe()
    }

    pub async fn submit_human_move(&self, row: usize, col: usize, symbol: Symbol) -> Result<MoveEvent, MoveError> {
        if self.is_cancelled() {
            return Err(MoveError::GameOver);
        }
        let event = self.controller.lock().await.apply_human_move(row, col, symbol)?;
        self.wake.notify_one();
        Ok(event)
    }

    /// Drives the game until it ends or the session is cancelled.
    /// Sleeps `autoplay_delay` before each computer move and waits for a
    /// human submission otherwise.
    pub async fn run(&self) -> SosGameState {
        loop {
            if self.is_cancelled() {
                log!("[session] Cancelled");
                break;
            }

            let (is_over, is_computer_turn) = {
                let controller = self.controller.lock().await;
                (controller.is_over(), controller.is_computer_turn())
            };

            if is_over {
                break;
            }

            if is_computer_turn {
                if !self.autoplay_delay.is_zero() {
                    tokio::select! {
                        _ = tokio::time::sleep(self.autoplay_delay) => {}
                        _ = self.wake.notified() => {}
                    }
                    if self.is_cancelled() {
                        continue;
                    }
                }

                let mut controller = self.controller.lock().await;
                if controller.play_computer_turn().is_none() {
                    log!("[session] Computer turn produced no move, stopping");
                    break;
                }
            } else {
                self.wake.notified().await;
            }
        }

        self.snapshot().await
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.wake.notify_one();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub async fn snapshot(&self) -> SosGameState {
        self.controller.lock().await.state().clone()
    }

    pub fn controller(&self) -> Arc<Mutex<SosController>> {
        self.controller.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::sos::settings::PlayerBinding;
    use crate::games::sos::types::{Side, Variant};

    fn session(red: PlayerBinding, blue: PlayerBinding) -> GameSession {
        let settings = GameSettings::new(3, Variant::General, red, blue, 77).unwrap();
        GameSession::new(settings, Duration::from_millis(1)).unwrap()
    }

    #[tokio::test]
    async fn test_computer_game_runs_to_completion() {
        let session = session(PlayerBinding::computer(Symbol::S), PlayerBinding::computer(Symbol::O));
        let mut rx = session.subscribe().await;

        let final_state = session.run().await;

        assert!(final_state.is_over());
        assert_eq!(final_state.moves_made(), 9);

        let mut received = 0;
        while rx.try_recv().is_ok() {
            received += 1;
        }
        assert_eq!(received, 9);
    }

    #[tokio::test]
    async fn test_human_move_wakes_computer() {
        let session = session(PlayerBinding::human(Symbol::S), PlayerBinding::computer(Symbol::O));
        let mut rx = session.subscribe().await;

        let runner = session.clone();
        let handle = tokio::spawn(async move { runner.run().await });

        let event = session.submit_human_move(1, 1, Symbol::O).await.unwrap();
        assert_eq!(event.mv.side, Side::Red);

        let first = rx.recv().await.unwrap();
        assert_eq!(first.mv.side, Side::Red);
        let reply = rx.recv().await.unwrap();
        assert_eq!(reply.mv.side, Side::Blue);

        assert_eq!(
            session.submit_human_move(1, 1, Symbol::S).await,
            Err(MoveError::CellOccupied { row: 1, col: 1 })
        );

        session.cancel();
        let state = handle.await.unwrap();
        assert_eq!(state.moves_made(), 2);
    }

    #[tokio::test]
    async fn test_new_game_cancels_running_autoplay() {
        let settings = GameSettings::new(
            12,
            Variant::General,
            PlayerBinding::computer(Symbol::S),
            PlayerBinding::computer(Symbol::O),
            5,
        )
        .unwrap();
        let old = GameSession::new(settings, Duration::from_millis(5)).unwrap();
        let mut rx = old.subscribe().await;

        let runner = old.clone();
        let handle = tokio::spawn(async move { runner.run().await });
        rx.recv().await.unwrap();

        let fresh = old
            .new_game(GameSettings::new(
                4,
                Variant::Simple,
                PlayerBinding::human(Symbol::S),
                PlayerBinding::human(Symbol::O),
                0,
            )
            .unwrap())
            .unwrap();

        let stopped = handle.await.unwrap();
        assert!(old.is_cancelled());
        assert!(!stopped.is_over());
        assert!(stopped.moves_made() < 144);

        assert!(!fresh.is_cancelled());
        assert_eq!(fresh.snapshot().await.board().size(), 4);
        assert!(fresh.submit_human_move(0, 0, Symbol::S).await.is_ok());
    }

    #[tokio::test]
    async fn test_cancelled_session_stops_immediately() {
        let session = session(PlayerBinding::computer(Symbol::S), PlayerBinding::computer(Symbol::O));
        session.cancel();

        let state = session.run().await;
        assert_eq!(state.moves_made(), 0);
        assert!(session.submit_human_move(0, 0, Symbol::S).await.is_err());
    }
}
