use crate::extractors::Extractor;
use std::fmt;

/// Errors that can occur while parsing a command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The shell tokenizer could not lex the input (unbalanced quotes, dangling escape)
    Tokenize { input: String },

    /// Tokenization succeeded but produced no executable
    InvalidCommand { input: String },

    /// No delegated command after the `sudo`-style flags
    CommandNotFound,

    /// No script after the ruby interpreter flags
    ScriptNotFound,

    /// Neither a script nor a `-m` module after the python interpreter flags
    ScriptOrModuleNotFound,

    /// No main class or jar after the JVM options
    ClassNameNotFound,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Tokenize { input } => {
                write!(f, "failed to tokenize command line `{}`", input)
            }
            ParseError::InvalidCommand { input } => write!(f, "invalid command - `{}`", input),
            ParseError::CommandNotFound => write!(f, "command not found"),
            ParseError::ScriptNotFound => write!(f, "script not found"),
            ParseError::ScriptOrModuleNotFound => write!(f, "script or module not found"),
            ParseError::ClassNameNotFound => write!(f, "class name not found"),
        }
    }
}

impl std::error::Error for ParseError {}

impl ParseError {
    /// The extractor that failed, if this is an extraction failure
    pub fn extractor(&self) -> Option<Extractor> {
        match self {
            ParseError::Tokenize { .. } | ParseError::InvalidCommand { .. } => None,
            ParseError::CommandNotFound => Some(Extractor::Generic),
            ParseError::ScriptNotFound => Some(Extractor::Ruby),
            ParseError::ScriptOrModuleNotFound => Some(Extractor::Python),
            ParseError::ClassNameNotFound => Some(Extractor::Java),
        }
    }

    /// True when the input was well formed but the dispatched extractor found no positional
    /// token. Callers usually fall back to the bare executable name in that case.
    pub fn is_extraction_failure(&self) -> bool {
        self.extractor().is_some()
    }
}

/// Result type for command line parsing
pub type ParseResult<T> = Result<T, ParseError>;
