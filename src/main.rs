use std::io;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use crossterm::execute;
use crossterm::style;
use crossterm::style::Stylize;
use tracing_subscriber::EnvFilter;

use conway::History;
use conway::io::FILE_PROMPT;
use conway::io::load_grid;
use conway::io::prompt;
use conway::io::run_session;

#[derive(Parser)]
#[command(name = "conway")]
#[command(about = "Run Conway's Game of Life on a bounded grid and look for cycles")]
struct Cli {
    /// Grid file to load. Prompted for when missing
    file: Option<PathBuf>,

    /// Advance this many generations, print the history and exit
    #[arg(long)]
    steps: Option<usize>,

    /// Print the cycle report after the history
    #[arg(long, requires = "steps")]
    cycle: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", format!("{e}").red());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    let path = match cli.file {
        Some(path) => path,
        None => {
            let Some(line) = prompt(FILE_PROMPT, &mut input, &mut stdout)? else {
                return Ok(());
            };

            PathBuf::from(line.trim())
        }
    };

    let grid = load_grid(&path)?;
    let mut history = History::new(grid);

    if let Some(steps) = cli.steps {
        history.advance(steps);

        execute!(stdout, style::Print(&history))?;
        if cli.cycle {
            writeln!(stdout, "{}", history.cycle_report())?;
        }

        return Ok(());
    }

    run_session(&mut history, &mut input, &mut stdout, &mut io::stderr())
        .context("Failed to run interactive session")
}
