use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use mf_flow::Demand;
use mf_graph::{CsMat, GraphError};
use mf_io::{EdgeDirection, Instance, IoError, LoadOptions, load, save};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Capacity factor must be nonnegative, got {0}")]
    NegativeCapacityFactor(f64),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "mf")]
#[command(about = "Multi-commodity flow instance tool", long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    /// YAML file with load options (format, edge_dir)
    #[arg(long, global = true)]
    options: Option<PathBuf>,

    /// Override the edge direction from the options file
    #[arg(long, global = true)]
    edge_dir: Option<EdgeDirection>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize an instance directory
    Info {
        dir: PathBuf,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mirror every link and write the result
    Double { input: PathBuf, output: PathBuf },
    /// Multiply costs and capacities (and demand amounts) by constants
    Scale {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, default_value_t = 1.0)]
        cost: f64,
        #[arg(long, default_value_t = 1.0)]
        capacity: f64,
    },
    /// Rescale so the largest cost and the largest capacity or demand are 1
    Normalize { input: PathBuf, output: PathBuf },
    /// Print the non-zero entries of a feature matrix
    Matrix {
        dir: PathBuf,
        #[arg(long, value_enum, default_value_t = FeatureArg::Cost)]
        feature: FeatureArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FeatureArg {
    Cost,
    Capacity,
}

#[derive(Serialize)]
struct Summary<'a> {
    nv: usize,
    ne: usize,
    nk: usize,
    total_demand: f64,
    max_cost: Option<f64>,
    max_capacity: Option<f64>,
    demands: &'a [Demand<u32, f64>],
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut opts = match &cli.options {
        Some(path) => LoadOptions::from_yaml_file(path)?,
        None => LoadOptions::default(),
    };
    if let Some(edge_dir) = cli.edge_dir {
        opts.edge_dir = edge_dir;
    }
    tracing::debug!(?opts, "load options");

    match cli.command {
        Commands::Info { dir, json } => cmd_info(&dir, &opts, json),
        Commands::Double { input, output } => {
            let opts = LoadOptions {
                edge_dir: EdgeDirection::Double,
                ..opts
            };
            transform(&input, &output, &opts, |pb| pb)
        }
        Commands::Scale {
            input,
            output,
            cost,
            capacity,
        } => {
            if capacity < 0.0 {
                return Err(CliError::NegativeCapacityFactor(capacity));
            }
            transform(&input, &output, &opts, |pb| pb.scale(cost, capacity))
        }
        Commands::Normalize { input, output } => {
            transform(&input, &output, &opts, |pb| pb.normalize())
        }
        Commands::Matrix { dir, feature } => cmd_matrix(&dir, &opts, feature),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_info(dir: &Path, opts: &LoadOptions, json: bool) -> CliResult<()> {
    let pb = load(dir, opts)?;
    if json {
        let summary = summarize(&pb);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{pb}");
    }
    Ok(())
}

fn summarize(pb: &Instance) -> Summary<'_> {
    let max = |values: Vec<f64>| values.into_iter().reduce(f64::max);
    Summary {
        nv: pb.nv(),
        ne: pb.ne(),
        nk: pb.nk(),
        total_demand: pb.amounts().iter().sum(),
        max_cost: max(pb.costs()),
        max_capacity: max(pb.capacities()),
        demands: pb.demands(),
    }
}

fn transform(
    input: &Path,
    output: &Path,
    opts: &LoadOptions,
    f: impl FnOnce(Instance) -> Instance,
) -> CliResult<()> {
    let pb = f(load(input, opts)?);
    let (links, services) = save(&pb, output)?;
    println!(
        "✓ Wrote {} links to {} and {} demands to {}",
        pb.ne(),
        links.display(),
        pb.nk(),
        services.display()
    );
    Ok(())
}

fn cmd_matrix(dir: &Path, opts: &LoadOptions, feature: FeatureArg) -> CliResult<()> {
    let pb = load(dir, opts)?;
    let matrix: CsMat<f64> = match feature {
        FeatureArg::Cost => pb.cost_matrix()?,
        FeatureArg::Capacity => pb.capacity_matrix()?,
    };
    println!("src,dst,value");
    for (value, (row, col)) in matrix.iter() {
        println!("{},{},{}", row + 1, col + 1, value);
    }
    Ok(())
}
