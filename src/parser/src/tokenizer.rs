use crate::errors::{ParseError, ParseResult};

/// Splits a command line into argv-like tokens using POSIX shell quoting rules.
pub fn tokenize(command_line: &str) -> ParseResult<Vec<String>> {
    shlex::split(command_line).ok_or_else(|| ParseError::Tokenize {
        input: command_line.to_string(),
    })
}
