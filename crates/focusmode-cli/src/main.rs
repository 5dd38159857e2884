use clap::{Parser, Subcommand};
use focusmode_core::{init_logging, Verbosity};

mod commands;

#[derive(Parser)]
#[command(name = "focusmode-cli", version, about = "Focus Mode client CLI")]
struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch current student status and the derived screen
    Status,
    /// Focus timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Visibility guard control
    Guard {
        #[command(subcommand)]
        action: commands::guard::GuardAction,
    },
    /// Submit the daily check-in
    Checkin {
        /// Quiz score (0-10)
        #[arg(long)]
        score: String,
        /// Focus minutes; defaults to the recorded timer value
        #[arg(long)]
        minutes: Option<i64>,
    },
    /// Mark the assigned remedial task complete
    Complete,
    /// Stream push updates from the backend
    Watch,
    /// Backend health probe
    Health,
    /// Local check-in history
    History {
        /// Maximum entries to show
        #[arg(long, default_value = "10")]
        limit: u32,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let verbosity = match cli.verbose {
        0 => Verbosity::Normal,
        1 => Verbosity::Verbose,
        _ => Verbosity::Trace,
    };
    init_logging(verbosity);

    let result = match cli.command {
        Commands::Status => commands::status::run(),
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Guard { action } => commands::guard::run(action),
        Commands::Checkin { score, minutes } => commands::checkin::run(score, minutes),
        Commands::Complete => commands::complete::run(),
        Commands::Watch => commands::watch::run(),
        Commands::Health => commands::health::run(),
        Commands::History { limit } => commands::history::run(limit),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
