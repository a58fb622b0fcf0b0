use std::str::FromStr;

use thiserror::Error;

/// Takes the next line from `text`, without its line break. If `text` is empty, it is left
/// as-is.
///
/// A linebreak is any of
/// * `\n`
/// * `\r\n`
///
/// The linebreak is completely consumed.
pub fn take_line(text: &str) -> (Option<&str>, &str) {
    if text.is_empty() {
        return (None, text);
    }

    let (line, text) = match text.split_once('\n') {
        Some((line, rest)) => (line, rest),
        None => (text, ""),
    };

    let line = line.strip_suffix('\r').unwrap_or(line);

    (Some(line), text)
}

/// Like `take_line`, but first consumes as many empty lines as possible.
pub fn take_nonblank_line(mut text: &str) -> (Option<&str>, &str) {
    loop {
        match take_line(text) {
            (Some(""), rest) => text = rest,
            res => return res,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConvertError {
    #[error("Expected a number, found an empty string")]
    Empty,

    #[error("Failed to convert \"{str}\"")]
    ParseError { str: String },
}

/// Converts `str` to `T` if `T: FromStr`, ignoring surrounding whitespace.
pub fn convert<T: FromStr>(str: &str) -> Result<T, ConvertError> {
    let str = str.trim();

    if str.is_empty() {
        return Err(ConvertError::Empty);
    }

    let Ok(res) = str.parse::<T>() else {
        return Err(ConvertError::ParseError {
            str: str.to_string(),
        });
    };

    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::ConvertError;

    #[test]
    fn test_take_line_crlf() {
        let (line, rest) = super::take_line("abc\r\ndef");

        assert_eq!(line, Some("abc"));
        assert_eq!(rest, "def");
    }

    #[test]
    fn test_take_line_last_line() {
        let (line, rest) = super::take_line("abc");

        assert_eq!(line, Some("abc"));
        assert_eq!(rest, "");

        assert_eq!(super::take_line(rest), (None, ""));
    }

    #[test]
    fn test_take_nonblank_line_keeps_spaces() {
        let (line, rest) = super::take_nonblank_line("\n\r\n   \nX\n");

        assert_eq!(line, Some("   "));
        assert_eq!(rest, "X\n");
    }

    #[test]
    fn test_take_nonblank_line_only_blanks() {
        assert_eq!(super::take_nonblank_line("\n\n\n"), (None, ""));
    }

    #[test]
    fn test_convert() {
        assert_eq!(super::convert::<usize>(" 12 "), Ok(12));
        assert_eq!(super::convert::<usize>(""), Err(ConvertError::Empty));
        assert_eq!(
            super::convert::<usize>("-3"),
            Err(ConvertError::ParseError {
                str: "-3".to_string()
            })
        );
    }
}
