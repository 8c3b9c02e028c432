use anyhow::{Context, Result};
use config::{Config as RConfig, Environment, File, FileFormat};
use procctx_parser::service_name::DEFAULT_TAG_PREFIX;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_CONFIG_FILE_LOCATION_FROM_HOME: &str = ".config/procctx/procctx.toml";
const DEFAULT_LOG_LEVEL: &str = "warn";
const ENV_PREFIX: &str = "PROCCTX";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    pub log_level: String,
    pub log_file: Option<String>,
    pub output: OutputFormat,
    pub tag_prefix: String,
    /// Tag extraction failures with the executable name instead of failing
    pub fallback_to_executable: bool,
}

pub struct ConfigLoader;

impl ConfigLoader {
    fn get_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(DEFAULT_CONFIG_FILE_LOCATION_FROM_HOME))
    }

    /// Loads defaults, then the config file (`path`, or the one in the home directory if
    /// present), then `PROCCTX_*` environment variables.
    pub fn load_config(path: Option<&str>) -> Result<Config> {
        let mut builder = RConfig::builder();

        // set defaults
        builder = builder
            .set_default("log_level", DEFAULT_LOG_LEVEL)?
            .set_default("output", "text")?
            .set_default("tag_prefix", DEFAULT_TAG_PREFIX)?
            .set_default("fallback_to_executable", true)?;

        builder = match path {
            Some(path) => builder.add_source(File::new(path, FileFormat::Toml).required(true)),
            None => match Self::get_config_path() {
                Some(default_path) => builder.add_source(
                    File::new(&default_path.to_string_lossy(), FileFormat::Toml).required(false),
                ),
                None => builder,
            },
        };

        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        builder
            .build()
            .context("failed to load config")?
            .try_deserialize()
            .context("failed to parse config file")
    }
}
