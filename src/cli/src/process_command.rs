use crate::commands::{Cli, Command};
use crate::config::{Config, ConfigLoader, OutputFormat};
use crate::logging::setup_logging;
use crate::output::render;
use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use procctx_parser::service_name::executable_service_name;
use procctx_parser::tokenizer::tokenize;
use procctx_parser::{parse, parse_command_line};
use std::io::{self, BufRead, Write};
use tracing::{debug, error, warn};

pub fn process_cli() -> Result<()> {
    let cli = Cli::parse();
    // Use the --config flag, if provided, when loading the configuration
    let mut config = ConfigLoader::load_config(cli.config.as_deref())?;
    if cli.json {
        config.output = OutputFormat::Json;
    }

    let _guard = setup_logging(&config)?;
    debug!(?config, "loaded config");

    match cli.command {
        Command::Parse { command_line } => {
            let command = parse_command_line(&command_line)
                .with_context(|| format!("Failed to parse `{}`", command_line))?;
            println!("{}", render(&command, config.output)?);
        }
        Command::Argv { executable, args } => {
            let command = parse(&executable, &args)
                .with_context(|| format!("Failed to parse argv of `{}`", executable))?;
            println!("{}", render(&command, config.output)?);
        }
        Command::Service { command_line } => {
            println!("{}", service_tag(&command_line, &config)?);
        }
        Command::Batch => {
            let failures = run_batch(io::stdin().lock(), &mut io::stdout().lock(), &config)?;
            if failures > 0 {
                bail!("{} command line(s) failed to parse", failures);
            }
        }
    }

    Ok(())
}

/// Computes `<tag_prefix>:<service name>` for a command line.
///
/// When the interpreter is known but no script, module or class follows it,
/// the executable name is used instead if `fallback_to_executable` is set.
pub fn service_tag(command_line: &str, config: &Config) -> Result<String> {
    let service = match parse_command_line(command_line) {
        Ok(command) => command.service_name(),
        Err(err) if err.is_extraction_failure() && config.fallback_to_executable => {
            warn!(%err, command_line, "falling back to the executable name");
            tokenize(command_line)?
                .first()
                .and_then(|exe| executable_service_name(exe))
        }
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to parse `{}`", command_line))
        }
    };

    service
        .map(|name| format!("{}:{}", config.tag_prefix, name))
        .ok_or_else(|| anyhow!("No service name found in `{}`", command_line))
}

/// Parses every non-blank line of `input`, writing one record per line to `output`.
///
/// Lines that fail are reported on stderr and skipped. Returns the number of failures.
pub fn run_batch<R: BufRead, W: Write>(input: R, output: &mut W, config: &Config) -> Result<usize> {
    let mut failures = 0;

    for (index, line) in input.lines().enumerate() {
        let line = line.context("Failed to read command line from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_command_line(&line) {
            Ok(command) => {
                writeln!(output, "{}", render(&command, config.output)?)
                    .context("Failed to write output")?;
            }
            Err(err) => {
                failures += 1;
                error!(line = index + 1, %err, "failed to parse command line");
                eprintln!("line {}: {}: `{}`", index + 1, err, line);
            }
        }
    }

    Ok(failures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn test_config() -> Config {
        Config {
            log_level: "warn".to_string(),
            log_file: None,
            output: OutputFormat::Json,
            tag_prefix: "process_context".to_string(),
            fallback_to_executable: true,
        }
    }

    #[rstest]
    #[case::jar("java -Xmx4000m -jar /opt/sheepdog/bin/myservice.jar", "process_context:myservice")]
    #[case::sudo("sudo -E -u dog /usr/local/bin/myApp -items=0,1,2,3", "process_context:myApp")]
    #[case::module("python3 -m hello", "process_context:hello")]
    #[case::script("./my-server.sh", "process_context:my-server")]
    #[case::fallback("python3 -u", "process_context:python3")]
    #[case::fallback_java_exe("java.exe -version", "process_context:java")]
    fn test_service_tag(#[case] command_line: &str, #[case] expected: &str) {
        assert_eq!(service_tag(command_line, &test_config()).unwrap(), expected);
    }

    #[test]
    fn test_service_tag_without_fallback() {
        let config = Config {
            fallback_to_executable: false,
            ..test_config()
        };
        let err = service_tag("python3 -u", &config).unwrap_err();
        assert!(err.to_string().contains("python3 -u"));
    }

    #[test]
    fn test_service_tag_custom_prefix() {
        let config = Config {
            tag_prefix: "service".to_string(),
            ..test_config()
        };
        assert_eq!(
            service_tag("ruby /usr/sbin/td-agent", &config).unwrap(),
            "service:td-agent"
        );
    }

    #[test]
    fn test_service_tag_empty_input() {
        assert!(service_tag("", &test_config()).is_err());
    }

    #[test]
    fn test_run_batch() {
        let input = "python3 -m hello\n\n   \nruby 'unterminated\njava -jar app.jar\nsudo -i\n";
        let mut output = Vec::new();

        let failures = run_batch(input.as_bytes(), &mut output, &test_config()).unwrap();

        assert_eq!(failures, 2);
        let lines: Vec<serde_json::Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["runtime"]["python"]["file_path"], "hello");
        assert_eq!(lines[1]["runtime"]["java"]["class_name"], "app.jar");
    }
}
