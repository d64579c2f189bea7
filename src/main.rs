use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};

use opgraph::graph::SinkPolicy;
use opgraph::{Result, tasks};

#[derive(Parser)]
#[command(name = "opgraph")]
#[command(about = "Operation graph loader, prefix builder and evaluator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// How to pick the root when several vertices have no outgoing edges
    #[arg(long, value_enum, default_value_t = SinkPolicy::First, global = true)]
    sinks: SinkPolicy,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the graph as a JSON adjacency document.
    Json {
        #[arg(long, default_value = "input41.txt")]
        input1: PathBuf,

        #[arg(long, default_value = "output.json")]
        output1: PathBuf,

        /// Optional second graph, processed after the first.
        #[arg(long)]
        input2: Option<PathBuf>,

        #[arg(long)]
        output2: Option<PathBuf>,
    },

    /// Write the prefix (call-style) expression rooted at the sink.
    Prefix {
        #[arg(long, default_value = "input41.txt")]
        input1: PathBuf,

        #[arg(long, default_value = "output.txt")]
        output1: PathBuf,

        /// Optional second graph, processed after the first.
        #[arg(long)]
        input2: Option<PathBuf>,

        #[arg(long)]
        output2: Option<PathBuf>,
    },

    /// Evaluate the graph against an operation table.
    Eval {
        /// Graph edge list.
        #[arg(long, default_value = "input41.txt")]
        input1: PathBuf,

        /// Operation table.
        #[arg(long)]
        input2: PathBuf,

        #[arg(long, default_value = "output.txt")]
        output1: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .init();

    let policy = cli.sinks;
    let results: Vec<Result<()>> = match cli.cmd {
        Commands::Json {
            input1,
            output1,
            input2,
            output2,
        } => each_pair(&input1, &output1, input2, output2, |i, o| {
            tasks::write_graph_json(i, o)
        }),
        Commands::Prefix {
            input1,
            output1,
            input2,
            output2,
        } => each_pair(&input1, &output1, input2, output2, |i, o| {
            tasks::write_prefix(i, o, policy)
        }),
        Commands::Eval {
            input1,
            input2,
            output1,
        } => vec![tasks::write_evaluation(&input1, &input2, &output1, policy)],
    };

    let mut failed = false;
    for err in results.into_iter().filter_map(|r| r.err()) {
        error!("{:#}", err);
        failed = true;
    }
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Run `job` on the first pair, then on the second one if both halves were given.
fn each_pair(
    input1: &Path,
    output1: &Path,
    input2: Option<PathBuf>,
    output2: Option<PathBuf>,
    job: impl Fn(&Path, &Path) -> Result<()>,
) -> Vec<Result<()>> {
    let mut results = vec![job(input1, output1)];
    match (input2, output2) {
        (Some(input), Some(output)) => {
            info!("------ second graph ------");
            results.push(job(&input, &output));
        }
        (None, None) => {}
        (input, output) => warn!(
            "second graph skipped: both --input2 and --output2 are needed (got {:?}, {:?})",
            input, output
        ),
    }
    results
}
