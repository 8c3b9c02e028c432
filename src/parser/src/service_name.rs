//! Naming policy turning a parsed [`CommandLine`] into a short service label.
//!
//! The core records keep the raw script, module, class or jar token; this
//! module is the only place where those tokens are shortened.

use crate::command_line::{CommandLine, RuntimeArgs};
use crate::executable::{remove_file_path, strip_exe_suffix, trim_quotes};
use std::borrow::Cow;

pub const DEFAULT_TAG_PREFIX: &str = "process_context";

const JAVA_JAR_EXTENSION: &str = ".jar";
const JAVA_APACHE_PREFIX: &str = "org.apache.";

impl CommandLine {
    /// Service label for this command line.
    ///
    /// Uses the first usable runtime candidate, otherwise the executable name
    /// without its extension.
    pub fn service_name(&self) -> Option<String> {
        self.runtime
            .as_ref()
            .and_then(runtime_service_name)
            .or_else(|| executable_service_name(&self.execute_path))
    }

    /// `<prefix>:<service name>`, e.g. `process_context:myservice`
    pub fn process_context_tag(&self, prefix: &str) -> Option<String> {
        self.service_name().map(|name| format!("{}:{}", prefix, name))
    }
}

/// Shortens the runtime identity.
///
/// A candidate that does not start with a letter (`/tmp/1234.py`) is passed
/// over and the scan resumes on the arguments after it. `None` when no
/// candidate is left.
pub fn runtime_service_name(runtime: &RuntimeArgs) -> Option<String> {
    let mut runtime = Cow::Borrowed(runtime);

    loop {
        let candidate = trim_colon_right(remove_file_path(runtime.identity()));
        if starts_with_letter(candidate) {
            return match &*runtime {
                RuntimeArgs::Java(_) => Some(java_service_name(candidate).to_string()),
                _ => Some(candidate.to_string()),
            };
        }

        let next = runtime.extractor().extract(runtime.args()).ok()?;
        runtime = Cow::Owned(next);
    }
}

/// Executable basename without `.exe` or any other extension: `./my-server.sh` -> `my-server`
pub fn executable_service_name(execute_path: &str) -> Option<String> {
    let exe = strip_exe_suffix(remove_file_path(trim_quotes(execute_path)));

    // trim trailing file extensions
    let exe = match exe.rfind('.') {
        Some(index) if index > 0 => &exe[..index],
        _ => exe,
    };

    (!exe.is_empty()).then(|| exe.to_string())
}

fn java_service_name(class_name: &str) -> &str {
    if let Some(jar) = class_name.strip_suffix(JAVA_JAR_EXTENSION) {
        return jar;
    }

    let mut name = class_name;
    if let Some(project) = name.strip_prefix(JAVA_APACHE_PREFIX) {
        // the project name follows the `org.apache.` package
        if let Some((project, _)) = project.split_once('.') {
            return project;
        }
        name = project;
    }

    // take just the class name without the package
    match name.rfind('.') {
        Some(index) if index + 1 < name.len() => &name[index + 1..],
        _ => name,
    }
}

fn trim_colon_right(s: &str) -> &str {
    match s.find(':') {
        Some(index) if index > 0 => &s[..index],
        _ => s,
    }
}

fn starts_with_letter(s: &str) -> bool {
    s.chars().next().is_some_and(char::is_alphabetic)
}
