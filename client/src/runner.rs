use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use common::config::{PacingConfig, SaveConfig};
use common::games::sos::{
    replay_game_paced, replay_settings, GameSession, GameSettings, MoveEvent, PlayerKind, ReplayCommand,
    ReplayOutcome, Variant,
};
use common::log;
use common::replay::{
    append_move, generate_save_filename, load_game, save_game, save_game_with_retry, SavedGame,
};

use crate::input::{parse_command, Command, HELP};
use crate::render::{describe_event, BoardView};

/// Writes the header sections up front so moves can be appended as they happen.
fn prepare_save_file(saves: &SaveConfig, variant: Variant, initial: &SavedGame) -> Option<PathBuf> {
    if !saves.enabled {
        return None;
    }

    let dir = Path::new(&saves.location);
    if let Err(e) = std::fs::create_dir_all(dir) {
        log!("Failed to create save directory: {}", e);
        return None;
    }

    let path = dir.join(generate_save_filename(variant));
    match save_game(&path, initial) {
        Ok(()) => Some(path),
        Err(e) => {
            log!("Failed to start save file {}: {}", path.display(), e);
            None
        }
    }
}

/// Prints every event and mirrors it into the live save file.
fn spawn_event_printer(
    mut events: mpsc::UnboundedReceiver<MoveEvent>,
    mut view: BoardView,
    save_path: Option<PathBuf>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            view.apply(&event);
            println!("{}", describe_event(&event));
            println!("{}", view.render());

            if let Some(ref path) = save_path {
                if let Err(e) = append_move(path, &event.mv) {
                    log!("Failed to append move to {}: {}", path.display(), e);
                }
            }

            match event.announcement {
                Some(ref announcement) => println!("{}", announcement),
                None if !event.game_over => println!("{} to move", event.next_side),
                None => {}
            }
        }
    })
}

async fn wait_for_printer(printer: tokio::task::JoinHandle<()>) {
    if let Err(e) = printer.await {
        log!("Event printer failed: {}", e);
    }
}

/// Rewrites the live file as a full snapshot carrying the final scores.
async fn finish_save(saved: &SavedGame, saves: &SaveConfig, path: Option<PathBuf>) {
    let Some(path) = path else {
        return;
    };
    let backoff = Duration::from_millis(saves.retry_backoff_ms);
    match save_game_with_retry(&path, saved, saves.retry_attempts, backoff).await {
        Ok(()) => println!("Game saved to {}", path.display()),
        Err(e) => println!("Could not save the game: {}", e),
    }
}

pub async fn run_game(
    settings: GameSettings,
    pacing: &PacingConfig,
    saves: &SaveConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let size = settings.grid_size;
    let variant = settings.variant;
    let automated = settings.red.kind == PlayerKind::Computer && settings.blue.kind == PlayerKind::Computer;
    let session = GameSession::new(settings, Duration::from_millis(pacing.autoplay_delay_ms))?;

    let (initial_save, player_mode, view) = {
        let controller = session.controller();
        let controller = controller.lock().await;
        (
            controller.saved_game(),
            controller.settings().player_mode(),
            BoardView::from_state(controller.state()),
        )
    };
    let save_path = prepare_save_file(saves, variant, &initial_save);

    println!("SOS {}x{} {} game ({})", size, size, variant, player_mode);
    println!("{}", HELP);
    println!("{}", view.render());

    let events = session.subscribe().await;
    let printer = spawn_event_printer(events, view, save_path.clone());

    let runner = session.clone();
    let mut game = tokio::spawn(async move { runner.run().await });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            result = &mut game => {
                if let Err(e) = result {
                    log!("Game task failed: {}", e);
                }
                break;
            }
            line = lines.next_line(), if stdin_open => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) | Err(_) => {
                        stdin_open = false;
                        if !automated {
                            session.cancel();
                        }
                        continue;
                    }
                };

                match parse_command(&line) {
                    Ok(Command::Quit) => {
                        session.cancel();
                    }
                    Ok(Command::Help) => println!("{}", HELP),
                    Ok(Command::Place { row, col, symbol }) => {
                        let symbol = match symbol {
                            Some(symbol) => symbol,
                            None => {
                                let controller = session.controller();
                                let controller = controller.lock().await;
                                controller.default_symbol(controller.side_to_move())
                            }
                        };
                        if let Err(e) = session.submit_human_move(row, col, symbol).await {
                            println!("Move rejected: {}", e);
                        }
                    }
                    Err(message) => println!("{}", message),
                }
            }
        }
    }

    let saved = session.controller().lock().await.saved_game();

    // The printer ends once the controller, and with it the sender, is dropped.
    drop(session);
    wait_for_printer(printer).await;

    finish_save(&saved, saves, save_path).await;
    Ok(())
}

pub async fn run_replay(file: &Path, pacing: &PacingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let saved = load_game(file)?;
    let settings = replay_settings(&saved);

    println!(
        "Replaying {} ({} {}x{}, {} moves)",
        file.display(),
        settings.variant,
        settings.grid_size,
        settings.grid_size,
        saved.moves.len()
    );
    if let Some(ref mode) = saved.player_mode {
        println!("Recorded with {}", mode);
    }
    println!("Commands: p = pause, r = resume, f = faster, s = slower, q = stop");

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let printer = spawn_event_printer(event_rx, BoardView::new(settings.grid_size), None);

    let (command_tx, mut command_rx) = mpsc::unbounded_channel();
    let stdin_task = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut speed = 1.0f32;
        while let Ok(Some(line)) = lines.next_line().await {
            let command = match line.trim() {
                "p" => ReplayCommand::Pause,
                "r" => ReplayCommand::Resume,
                "q" => ReplayCommand::Stop,
                "f" => {
                    speed = (speed * 2.0).min(4.0);
                    ReplayCommand::SetSpeed(speed)
                }
                "s" => {
                    speed = (speed / 2.0).max(0.25);
                    ReplayCommand::SetSpeed(speed)
                }
                _ => continue,
            };
            if command_tx.send(command).is_err() {
                break;
            }
        }
    });

    let delay = Duration::from_millis(pacing.replay_delay_ms);
    let outcome = replay_game_paced(&saved, delay, event_tx, &mut command_rx).await?;
    stdin_task.abort();
    wait_for_printer(printer).await;

    for line in replay_summary(&outcome) {
        println!("{}", line);
    }
    Ok(())
}

fn replay_summary(outcome: &ReplayOutcome) -> Vec<String> {
    let mut lines = Vec::new();
    match &outcome.halted {
        Some(halt) => lines.push(format!(
            "Replay stopped at move {} of {}: {}",
            halt.index + 1,
            outcome.total,
            halt.error
        )),
        None if outcome.stopped => lines.push(format!("Replay stopped after {} moves", outcome.applied)),
        None => lines.push(format!("Replay finished: {} moves", outcome.applied)),
    }

    let recorded = outcome.recorded_scores;
    let replayed = outcome.state.scores();
    if outcome.is_complete() && recorded != replayed {
        lines.push(format!(
            "Note: file records Red {} : {} Blue, replay gives Red {} : {} Blue",
            recorded.0, recorded.1, replayed.0, replayed.1
        ));
    }
    lines
}
