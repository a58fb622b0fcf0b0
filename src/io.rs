use std::fs;
use std::io;
use std::io::BufRead;
use std::path::Path;
use std::path::PathBuf;

use crossterm::execute;
use crossterm::style;
use crossterm::style::Stylize;
use thiserror::Error;
use tracing::debug;
use tracing::info;

use crate::codec::DecodeError;
use crate::command::Command;
use crate::command::parse_command;
use crate::grid::Grid;
use crate::history::History;

pub const FILE_PROMPT: &str = "Enter the filename of the board (e.g., loaf.txt): ";
pub const STEPS_PROMPT: &str = "Enter the number of steps to run (or 'exit' to quit): ";
const INVALID_INPUT: &str = "Invalid input. Please enter a valid number.";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Error reading file: {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error creating board: {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
}

/// Read and decode the grid stored at `path`
pub fn load_grid(path: impl AsRef<Path>) -> Result<Grid, LoadError> {
    let path = path.as_ref();

    let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let grid = Grid::decode(&text).map_err(|source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), rows = grid.rows(), cols = grid.cols(), "loaded grid");

    Ok(grid)
}

/// Print `message` and read one line of input, without its line break.
///
/// Returns `None` once `input` is exhausted.
pub fn prompt<R, W>(message: &str, input: &mut R, output: &mut W) -> io::Result<Option<String>>
where
    R: BufRead,
    W: io::Write,
{
    execute!(output, style::Print(message))?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    let len = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(len);

    Ok(Some(line))
}

/// Prompt for commands until the user exits or `input` runs out.
///
/// Generations and reports go to `output`, rejected input is reported on `errors`.
pub fn run_session<R, W, E>(
    history: &mut History,
    input: &mut R,
    output: &mut W,
    errors: &mut E,
) -> io::Result<()>
where
    R: BufRead,
    W: io::Write,
    E: io::Write,
{
    loop {
        execute!(output, style::Print(history.current()))?;

        let Some(line) = prompt(STEPS_PROMPT, input, output)? else {
            break;
        };

        match parse_command(&line) {
            Ok(Command::Exit) => break,
            Ok(Command::Cycle) => {
                execute!(output, style::Print(format!("{}\n", history.cycle_report())))?;
            }
            Ok(Command::Advance(steps)) => {
                history.advance(steps);

                execute!(
                    output,
                    style::Print(format!("Updated board after {steps} steps:\n")),
                    style::Print(&*history),
                    style::Print(format!("{}\n", history.cycle_report()))
                )?;
            }
            Err(e) => {
                debug!("Rejected input: {e}");
                execute!(
                    errors,
                    style::PrintStyledContent(INVALID_INPUT.red()),
                    style::Print("\n")
                )?;
            }
        }
    }

    Ok(())
}
