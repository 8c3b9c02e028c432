use crate::config::OutputFormat;
use anyhow::{Context, Result};
use procctx_parser::{CommandLine, Executable, RuntimeArgs};
use serde::Serialize;
use std::fmt::{self, Write};

#[derive(Serialize)]
struct Record<'a> {
    #[serde(flatten)]
    command: &'a CommandLine,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    service: Option<String>,
}

/// Version suffix of the executable name, e.g. `2.7` for `python2.7`
fn executable_version(command: &CommandLine) -> Option<String> {
    let executable = Executable::parse(&command.execute_path);
    executable.has_version().then_some(executable.version)
}

/// Renders a parsed command line in the requested format, without a trailing newline
pub fn render(command: &CommandLine, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(command),
        OutputFormat::Text => render_text(command),
    }
}

pub fn render_json(command: &CommandLine) -> Result<String> {
    let record = Record {
        command,
        version: executable_version(command),
        service: command.service_name(),
    };
    serde_json::to_string(&record).context("Failed to serialize command line")
}

pub fn render_text(command: &CommandLine) -> Result<String> {
    let mut out = String::new();
    write_text(&mut out, command).context("Failed to format command line")?;
    Ok(out.trim_end().to_string())
}

fn write_text(out: &mut impl Write, command: &CommandLine) -> fmt::Result {
    writeln!(out, "execute_path: {}", command.execute_path)?;
    if let Some(version) = executable_version(command) {
        writeln!(out, "version: {}", version)?;
    }
    writeln!(out, "args: {:?}", command.args)?;

    match &command.runtime {
        None => writeln!(out, "runtime: none")?,
        Some(runtime) => {
            writeln!(out, "runtime: {}", runtime.extractor())?;
            match runtime {
                RuntimeArgs::Sub(sub) => writeln!(out, "command: {}", sub.command)?,
                RuntimeArgs::Ruby(ruby) => writeln!(out, "file_path: {}", ruby.file_path)?,
                RuntimeArgs::Python(python) => writeln!(out, "file_path: {}", python.file_path)?,
                RuntimeArgs::Java(java) => {
                    writeln!(out, "class_name: {}", java.class_name)?;
                    writeln!(out, "jmx_enable: {}", java.jmx_enable)?;
                    writeln!(out, "jmx_port: {}", java.jmx_port)?;
                    writeln!(out, "jmx_ssl: {}", java.jmx_ssl)?;
                    writeln!(out, "jmx_authenticate: {}", java.jmx_authenticate)?;
                }
            }
            writeln!(out, "runtime_args: {:?}", runtime.args())?;
        }
    }

    if let Some(service) = command.service_name() {
        writeln!(out, "service: {}", service)?;
    }
    Ok(())
}
