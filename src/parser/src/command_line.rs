use crate::errors::{ParseError, ParseResult};
use crate::executable::{trim_quotes, Executable};
use crate::extractors::Extractor;
use crate::tokenizer::tokenize;
use serde::{Deserialize, Serialize};

/// Structured view of a process command line.
///
/// `execute_path` and `args` are kept exactly as given; normalization of the
/// executable is only used to pick an extractor. At most one runtime payload
/// is present.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommandLine {
    pub execute_path: String,
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<RuntimeArgs>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeArgs {
    Sub(SubArgs),
    Ruby(RubyArgs),
    Python(PythonArgs),
    Java(JavaArgs),
}

/// Command delegated to by a launcher such as `sudo`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubArgs {
    pub command: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RubyArgs {
    pub file_path: String,
    pub args: Vec<String>,
}

/// `file_path` is either a script path or, with `-m`, a module name
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PythonArgs {
    pub file_path: String,
    pub args: Vec<String>,
}

/// `class_name` is a (package qualified) main class, or the jar passed to `-jar`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JavaArgs {
    pub class_name: String,
    pub args: Vec<String>,
    pub jmx_enable: bool,
    pub jmx_port: String,
    pub jmx_ssl: bool,
    pub jmx_authenticate: bool,
}

impl RuntimeArgs {
    pub fn extractor(&self) -> Extractor {
        match self {
            RuntimeArgs::Sub(_) => Extractor::Generic,
            RuntimeArgs::Ruby(_) => Extractor::Ruby,
            RuntimeArgs::Python(_) => Extractor::Python,
            RuntimeArgs::Java(_) => Extractor::Java,
        }
    }

    /// The token identifying the unit of work: command, script, module, class or jar
    pub fn identity(&self) -> &str {
        match self {
            RuntimeArgs::Sub(sub) => &sub.command,
            RuntimeArgs::Ruby(ruby) => &ruby.file_path,
            RuntimeArgs::Python(python) => &python.file_path,
            RuntimeArgs::Java(java) => &java.class_name,
        }
    }

    /// Arguments passed on to the identified unit of work
    pub fn args(&self) -> &[String] {
        match self {
            RuntimeArgs::Sub(sub) => &sub.args,
            RuntimeArgs::Ruby(ruby) => &ruby.args,
            RuntimeArgs::Python(python) => &python.args,
            RuntimeArgs::Java(java) => &java.args,
        }
    }
}

impl CommandLine {
    pub fn sub(&self) -> Option<&SubArgs> {
        match &self.runtime {
            Some(RuntimeArgs::Sub(sub)) => Some(sub),
            _ => None,
        }
    }

    pub fn ruby(&self) -> Option<&RubyArgs> {
        match &self.runtime {
            Some(RuntimeArgs::Ruby(ruby)) => Some(ruby),
            _ => None,
        }
    }

    pub fn python(&self) -> Option<&PythonArgs> {
        match &self.runtime {
            Some(RuntimeArgs::Python(python)) => Some(python),
            _ => None,
        }
    }

    pub fn java(&self) -> Option<&JavaArgs> {
        match &self.runtime {
            Some(RuntimeArgs::Java(java)) => Some(java),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.execute_path.is_empty() && self.args.is_empty() && self.runtime.is_none()
    }
}

/// Parses a raw command line string such as the output of `ps -o command=`.
///
/// An empty string yields an empty [`CommandLine`]. Input that tokenizes to
/// nothing (whitespace, or only an empty quoted executable) is an
/// [`ParseError::InvalidCommand`].
pub fn parse_command_line(command_line: &str) -> ParseResult<CommandLine> {
    if command_line.is_empty() {
        return Ok(CommandLine::default());
    }

    let tokens = tokenize(command_line)?;
    let Some((exe, args)) = tokens.split_first() else {
        return Err(ParseError::InvalidCommand {
            input: command_line.to_string(),
        });
    };

    // trim any quotes from the executable
    let exe = trim_quotes(exe);
    if exe.is_empty() {
        return Err(ParseError::InvalidCommand {
            input: command_line.to_string(),
        });
    }

    parse(exe, args)
}

/// Parses an already split command line, e.g. the argv of a running process.
pub fn parse<S: AsRef<str>>(execute_path: &str, args: &[S]) -> ParseResult<CommandLine> {
    let execute_path = trim_quotes(execute_path);
    let executable = Executable::parse(execute_path);

    let runtime = Extractor::lookup(&executable)
        .map(|extractor| extractor.extract(args))
        .transpose()?;

    Ok(CommandLine {
        execute_path: execute_path.to_string(),
        args: args.iter().map(|arg| arg.as_ref().to_string()).collect(),
        runtime,
    })
}
