mod app;
mod history;
mod render;
mod theme;

use app::{App, Outcome};
use clap::{Args, Parser, Subcommand};
use history::HistoryManager;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use theme::{Theme, ThemeName};

/// Generate, solve and check grid mazes
#[derive(Parser, Debug)]
#[command(name = "maze", version, about, long_about = None)]
struct Cli {
    /// Print plain glyphs without colors
    #[arg(long, global = true)]
    plain: bool,

    /// Color theme
    #[arg(long, value_enum, default_value_t = ThemeName::Dark, global = true)]
    theme: ThemeName,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Raise the log level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a new maze
    Generate(GenerateArgs),
    /// Solve a maze file, marking the path and dead ends
    Solve {
        /// Maze file
        file: PathBuf,
        /// Write the solved maze here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check the solution drawn in a maze file
    Check {
        /// Maze file
        file: PathBuf,
    },
    /// Print a maze file
    Show {
        /// Maze file
        file: PathBuf,
    },
    /// Summarize past runs
    History {
        /// Delete the saved history
        #[arg(long)]
        clear: bool,
        /// Number of recent runs to list
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Maze width in cells
    #[arg(long, default_value_t = 21, value_parser = dimension_parser())]
    pub width: usize,

    /// Maze height in cells
    #[arg(long, default_value_t = 21, value_parser = dimension_parser())]
    pub height: usize,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Allow direction changes at every step
    #[arg(long)]
    pub winding: bool,

    /// Solve the maze after generating it
    #[arg(long)]
    pub solve: bool,

    /// Write the maze here
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Largest width or height accepted on the command line
const MAX_DIMENSION: u64 = 4096;

fn dimension_parser() -> clap::builder::RangedU64ValueParser<usize> {
    clap::builder::RangedU64ValueParser::<usize>::new().range(1..=MAX_DIMENSION)
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let theme = (!cli.plain && !cli.json).then(|| Theme::named(cli.theme));
    let mut stdout = io::stdout().lock();
    let mut app = App::new(&mut stdout, theme, cli.json, HistoryManager::load());

    match app.run(cli.command) {
        Ok(Outcome::Done) => ExitCode::SUCCESS,
        Ok(Outcome::Unsolved) => ExitCode::from(2),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
