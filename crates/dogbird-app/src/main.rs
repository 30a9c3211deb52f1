use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use log::{error, info};

use dogbird_app::config::AppConfig;
use dogbird_app::control;
use dogbird_app::core::commands::FieldCommand;
use dogbird_app::core::constants::SHOUT_TEST_TICKS;
use dogbird_app::journal::{self, Journal};
use dogbird_app::logging;
use dogbird_app::loudness::SharedLoudness;
use dogbird_app::state::AppState;
use dogbird_app::AppError;

/// Runs the dog-bird failure journal headless
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Journal file; overrides the config's `journal_path`
    #[arg(short, long)]
    journal: Option<PathBuf>,

    /// How long to run the clock, in seconds
    #[arg(short, long, default_value_t = 5)]
    seconds: u64,

    /// Failure notes to hatch at startup
    #[arg(short, long = "note")]
    notes: Vec<String>,

    /// Goal to set for this session
    #[arg(short, long)]
    goal: Option<String>,

    /// Fire a shout test halfway through the run
    #[arg(long)]
    shout: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let config = AppConfig::load_or_default(args.config.as_deref())?;
    if config.verbose {
        logging::set_verbose(true);
    }

    let journal_path = args.journal.or_else(|| config.journal_path.clone());
    let journal = match &journal_path {
        Some(path) => journal::load_or_default(path)?,
        None => Journal::default(),
    };

    let state = AppState::new();
    let feed = Arc::new(SharedLoudness::new());
    control::start_simulation(&state, &config, journal, feed.clone())?;

    if let Some(text) = args.goal {
        control::send_command(&state, FieldCommand::SetGoal { text })?;
    }
    for text in args.notes {
        control::send_command(&state, FieldCommand::SubmitNote { text })?;
    }

    let half = Duration::from_secs(args.seconds) / 2;
    std::thread::sleep(half);
    if args.shout {
        info!("shout test");
        control::send_command(
            &state,
            FieldCommand::Shout {
                ticks: SHOUT_TEST_TICKS,
            },
        )?;
    }
    std::thread::sleep(Duration::from_secs(args.seconds) - half);

    if let Some(snapshot) = control::get_snapshot(&state)? {
        info!(
            "tick {}: {} dog-bird(s) on the field, {:?}",
            snapshot.time.tick,
            snapshot.dog_birds.len(),
            snapshot.mode
        );
    }

    let journal = control::stop_simulation(&state)?;
    if let Some(path) = &journal_path {
        journal::save_to_file(path, &journal)?;
    }
    Ok(())
}
