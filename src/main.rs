//! cellprep command-line entry point.

mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

/// Version string: git hash and build date for dev builds, clean version
/// for official builds (`--features release`).
#[cfg(not(feature = "release"))]
const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    " ",
    env!("CELLPREP_BUILD_DATE"),
    ")"
);
#[cfg(feature = "release")]
const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CELLPREP_BUILD_DATE"), ")");

#[derive(Parser)]
#[command(
    name = "cellprep",
    version = VERSION,
    about = "Convert cellular diagnostic log dumps into aligned time series"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Process trial log files into aligned bandwidth/RSRP pairs
    Process(commands::process::ProcessArgs),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(not(tarpaulin_include))]
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Process(args) => commands::process::handle(args),
        Command::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "cellprep",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}
