mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use kspwlo_cli::output::OutputFormat;
use kspwlo_lib::Error as LibError;

use commands::info::handle_info_command;
use commands::paths::{handle_paths_command, PathsCommandArgs};

#[derive(Parser, Debug)]
#[command(author, version, about = "k-shortest paths with limited overlap")]
struct Cli {
    /// Graph file to load.
    #[arg(long, global = true, env = "KSPWLO_GRAPH")]
    graph: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute up to k alternative paths whose pairwise overlap stays within theta.
    Paths(PathsArgs),
    /// Print node and edge statistics for the graph.
    Info,
}

#[derive(Args, Debug)]
struct PathsArgs {
    /// Source node id.
    #[arg(long = "from")]
    from: usize,
    /// Target node id.
    #[arg(long = "to")]
    to: usize,
    /// Maximum number of paths to return.
    #[arg(short, long, default_value_t = 3)]
    k: usize,
    /// Largest admissible overlap ratio with an earlier path, within [0, 1].
    #[arg(long, default_value_t = 0.5, allow_negative_numbers = true)]
    theta: f64,
    /// Algorithm: op, mp, opplus, svp or esx (case-insensitive).
    #[arg(long, default_value = "opplus")]
    algorithm: String,
}

impl From<PathsArgs> for PathsCommandArgs {
    fn from(args: PathsArgs) -> Self {
        Self {
            from: args.from,
            to: args.to,
            k: args.k,
            theta: args.theta,
            algorithm: args.algorithm,
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code_for(&err))
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let graph = cli.graph.as_deref();
    match cli.command {
        Command::Paths(args) => handle_paths_command(graph, &args.into(), cli.format),
        Command::Info => handle_info_command(graph, cli.format),
    }
}

/// Library errors carry their own exit status; anything else exits with 1.
fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<LibError>()
        .map_or(1, LibError::exit_code)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
