mod config;
mod input;
mod render;
mod runner;

use std::path::PathBuf;
use clap::{Parser, Subcommand};

use common::config::SosConfig;
use common::games::sos::{GameSettings, PlayerBinding, Variant};
use common::logger::{self, LogSink};
use common::log;

#[derive(Parser)]
#[command(name = "sos_client")]
struct Args {
    /// YAML config; defaults are used when the file does not exist.
    #[arg(long, default_value = config::DEFAULT_CONFIG_FILE)]
    config: String,

    #[arg(long)]
    use_log_prefix: bool,

    #[command(subcommand)]
    command: Mode,
}

#[derive(Subcommand)]
enum Mode {
    /// Play from the terminal with the sides configured in the config file.
    Play {
        #[arg(long)]
        size: Option<usize>,
        #[arg(long)]
        mode: Option<Variant>,
    },
    /// Computer against computer.
    Watch {
        #[arg(long)]
        size: Option<usize>,
        #[arg(long)]
        mode: Option<Variant>,
    },
    /// Replay a saved game file.
    Replay { file: PathBuf },
}

fn build_settings(
    config: &SosConfig,
    size: Option<usize>,
    mode: Option<Variant>,
    computers_only: bool,
) -> Result<GameSettings, Box<dyn std::error::Error>> {
    let mut settings = GameSettings::try_from(&config.game)?;
    if let Some(size) = size {
        settings.grid_size = size;
    }
    if let Some(mode) = mode {
        settings.variant = mode;
    }
    if computers_only {
        settings.red = PlayerBinding::computer(settings.red.symbol);
        settings.blue = PlayerBinding::computer(settings.blue.symbol);
    }
    settings.validate()?;
    Ok(settings)
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = config::get_config_manager(&args.config).get_config()?;

    match args.command {
        Mode::Play { size, mode } => {
            let settings = build_settings(&config, size, mode, false)?;
            runner::run_game(settings, &config.pacing, &config.saves).await
        }
        Mode::Watch { size, mode } => {
            let settings = build_settings(&config, size, mode, true)?;
            runner::run_game(settings, &config.pacing, &config.saves).await
        }
        Mode::Replay { file } => runner::run_replay(&file, &config.pacing).await,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger_with_sink(prefix, LogSink::Stderr);

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(run(args));
    // A pending stdin read cannot be cancelled, so do not wait for it.
    runtime.shutdown_background();

    if let Err(ref e) = result {
        log!("Exiting with error: {}", e);
    }
    result
}
