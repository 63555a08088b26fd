//! gss CLI - run graph-structured stack scripts from the command line
//!
//! Each script line is executed against one in-memory stack and reported
//! as a JSON object on stdout. Logs go to stderr.

use clap::{Parser, Subcommand};
use gss::script::{self, Session};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gss")]
#[command(about = "Drive a graph-structured stack from a command script")]
#[command(version)]
struct Cli {
    /// Output format (json or text)
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Log every graph mutation to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a script file ("-" reads stdin)
    Run {
        /// Path to the script
        script: PathBuf,
    },

    /// Run the built-in divergence/convergence/pop walk-through
    Demo,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let source = match &cli.command {
        Commands::Run { script } => read_script(script)?,
        Commands::Demo => script::DEMO.to_string(),
    };

    let lines = script::parse(&source)?;
    let mut session = Session::new();
    let report = session.run(&lines);

    for value in &report.outputs {
        output(&cli.format, value)?;
    }

    if report.failures > 0 && matches!(cli.command, Commands::Run { .. }) {
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("gss=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_script(path: &PathBuf) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        return Ok(source);
    }

    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read script {}: {}", path.display(), e))
}

fn output(format: &OutputFormat, value: &serde_json::Value) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(value)?);
        }
        OutputFormat::Text => {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
    }
    Ok(())
}
