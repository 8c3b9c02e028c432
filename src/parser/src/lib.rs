//! Recovers the service identity hidden behind generic interpreters
//! (`python3`, `ruby`, `java`, `sudo`) in a process command line.

pub mod command_line;
pub mod errors;
pub mod executable;
pub mod extractors;
pub mod service_name;
pub mod tokenizer;

pub use command_line::{
    parse, parse_command_line, CommandLine, JavaArgs, PythonArgs, RubyArgs, RuntimeArgs, SubArgs,
};
pub use errors::{ParseError, ParseResult};
pub use executable::Executable;
pub use extractors::Extractor;
