mod generic;
mod java;
mod python;

use crate::command_line::RuntimeArgs;
use crate::errors::ParseResult;
use crate::executable::Executable;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

/// Runtime-specific scanners, one per interpreter family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extractor {
    /// Delegating launchers such as `sudo`
    Generic,
    Python,
    Ruby,
    Java,
}

// binaries that usually carry more context about what's running in their arguments
static BINS_WITH_CONTEXT: LazyLock<HashMap<&'static str, Extractor>> = LazyLock::new(|| {
    HashMap::from([
        ("python", Extractor::Python),
        ("python2.7", Extractor::Python),
        ("python3", Extractor::Python),
        ("python3.7", Extractor::Python),
        ("ruby2.3", Extractor::Ruby),
        ("ruby", Extractor::Ruby),
        ("java", Extractor::Java),
        ("java.exe", Extractor::Java),
        ("sudo", Extractor::Generic),
    ])
});

impl Extractor {
    /// Finds the extractor for an executable: exact basename first, then the
    /// version-stripped name (`python3.11` -> `python`).
    pub fn lookup(executable: &Executable) -> Option<Extractor> {
        if let Some(extractor) = BINS_WITH_CONTEXT.get(executable.basename.as_str()) {
            debug!(basename = %executable.basename, %extractor, "matched executable");
            return Some(*extractor);
        }

        match BINS_WITH_CONTEXT.get(executable.name.as_str()) {
            Some(extractor) => {
                debug!(
                    basename = %executable.basename,
                    name = %executable.name,
                    version = %executable.version,
                    %extractor,
                    "matched executable without version"
                );
                Some(*extractor)
            }
            None => {
                debug!(basename = %executable.basename, "no extractor for executable");
                None
            }
        }
    }

    /// Scans the arguments following the executable and returns the runtime payload.
    pub fn extract<S: AsRef<str>>(self, args: &[S]) -> ParseResult<RuntimeArgs> {
        match self {
            Extractor::Generic => generic::extract_sub(args).map(RuntimeArgs::Sub),
            Extractor::Ruby => generic::extract_ruby(args).map(RuntimeArgs::Ruby),
            Extractor::Python => python::extract(args).map(RuntimeArgs::Python),
            Extractor::Java => java::extract(args).map(RuntimeArgs::Java),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Extractor::Generic => "generic",
            Extractor::Python => "python",
            Extractor::Ruby => "ruby",
            Extractor::Java => "java",
        }
    }
}

impl fmt::Display for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Splits `args` around the accepted positional token: (token, everything after it)
fn split_at_positional<S: AsRef<str>>(args: &[S], index: usize) -> (String, Vec<String>) {
    let positional = args[index].as_ref().to_string();
    let rest = args[index + 1..]
        .iter()
        .map(|arg| arg.as_ref().to_string())
        .collect();
    (positional, rest)
}
