use clap::{Parser, Subcommand};

#[derive(Parser, Clone)]
#[clap(
    name = "procctx",
    about = "Extracts the service identity (script, module, main class or sub-command) from process command lines",
    version
)]
pub struct Cli {
    /// Path to a TOML config file
    #[clap(long, global = true)]
    pub config: Option<String>,

    /// Print records as JSON, overriding the configured output format
    #[clap(long, global = true)]
    pub json: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Parse a command line string, e.g. the output of `ps -o command=`
    Parse { command_line: String },

    /// Parse an already split command line: `procctx argv -- java -jar app.jar`
    Argv {
        executable: String,
        #[clap(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Print the process context tag of a command line
    Service { command_line: String },

    /// Parse one command line per line of stdin
    Batch,
}
