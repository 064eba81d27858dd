use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{error::ErrorKind, CommandFactory, Parser};
use log::{info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;
use simplelog::{Config, WriteLogger};
use snaker::config::{GridGeometry, DEFAULT_FOOD_COUNT, THEME_CLASSIC};
use snaker::controller::{ControllerSettings, GameController};
use snaker::food::check_food_count;
use snaker::game::GamePhase;
use snaker::input::{poll_input, GameInput};
use snaker::level::level_count;
use snaker::score::{scores_path, HighScoreStore, JsonScoreStore};
use snaker::terminal_runtime::{install_panic_hook, TerminalSession};
use snaker::ui::hud::HudInfo;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Level to start on.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    level: u32,

    /// Number of food items kept on the board; must leave most cells free.
    #[arg(long, default_value_t = DEFAULT_FOOD_COUNT)]
    foods: usize,

    /// Seed for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,

    /// Log file path (defaults next to the score file).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Log at debug level.
    #[arg(long)]
    verbose: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let geometry = GridGeometry::default();
    let food_count = check_food_count(cli.foods, geometry)
        .unwrap_or_else(|error| Cli::command().error(ErrorKind::ValueValidation, error).exit());

    init_logging(&cli)?;
    install_panic_hook();

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let store = JsonScoreStore::at_default_location();
    info!("scores stored at {}", store.path().display());

    let controller = GameController::new(
        store,
        rng,
        ControllerSettings {
            geometry,
            level: cli.level,
            food_count,
            ..ControllerSettings::default()
        },
    );

    let mut session = TerminalSession::enter()?;
    run(&mut session, controller)
}

fn run<S: HighScoreStore>(
    session: &mut TerminalSession,
    mut controller: GameController<S>,
) -> io::Result<()> {
    let hud_info = HudInfo {
        theme: &THEME_CLASSIC,
        level_count: level_count(),
    };

    loop {
        session.draw(controller.state(), &hud_info)?;

        let wait = controller
            .timer()
            .remaining(Instant::now())
            .map_or(FRAME_INTERVAL, |remaining| remaining.min(FRAME_INTERVAL));

        if let Some(input) = poll_input(wait)? {
            if input == GameInput::Quit {
                info!("quit requested");
                return Ok(());
            }
            handle_input(&mut controller, input);
        }

        let _ = controller.poll(Instant::now());
    }
}

fn handle_input<S: HighScoreStore>(controller: &mut GameController<S>, input: GameInput) {
    let now = Instant::now();
    match input {
        GameInput::Direction(key) => controller.change_direction(key),
        GameInput::Confirm => match controller.state().phase {
            GamePhase::NotStarted => controller.start(now),
            GamePhase::GameOver => controller.restart(),
            GamePhase::Running | GamePhase::Paused => {}
        },
        GameInput::Pause => controller.toggle_pause(now),
        GameInput::SelectLevel(level) => {
            let _ = controller.select_level(level);
        }
        GameInput::Quit => {}
    }
}

fn init_logging(cli: &Cli) -> io::Result<()> {
    let path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| scores_path().with_file_name("snaker.log"));
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    WriteLogger::init(level, Config::default(), File::create(&path)?).map_err(io::Error::other)
}
