use thiserror::Error;

use crate::parse_util;
use crate::parse_util::ConvertError;

/// Something the user asked for at the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Advance the history by `n` generations
    Advance(usize),

    /// Report the first repeated pair of generations
    Cycle,

    /// Exit the application
    Exit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid step count \"{input}\": {source}")]
    InvalidSteps {
        input: String,
        #[source]
        source: ConvertError,
    },
}

/// Parse one line of user input. Keywords are case insensitive.
pub fn parse_command(input: &str) -> Result<Command, CommandError> {
    let input = input.trim();

    if input.eq_ignore_ascii_case("exit") {
        return Ok(Command::Exit);
    }

    if input.eq_ignore_ascii_case("cycle") {
        return Ok(Command::Cycle);
    }

    let steps = parse_util::convert(input).map_err(|source| CommandError::InvalidSteps {
        input: input.to_string(),
        source,
    })?;

    Ok(Command::Advance(steps))
}
