// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Grosso command line: mine trending sequential patterns and inspect datasets.

use std::fs::File;
use std::io;
use std::io::BufWriter;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use grosso::bound::ShatterBound;
use grosso::capacity::CapacityComparison;
use grosso::dataset::Dataset;
use grosso::error::Error;
use grosso::evaluate::GroundTruthReport;
use grosso::miner::CommandMiner;
use grosso::miner::MinedPattern;
use grosso::miner::PatternFile;
use grosso::miner::SequentialPatternMiner;
use grosso::run::BoundMode;
use grosso::run::Grosso;
use grosso::run::RunConfig;
use grosso::run::RunConfigBuilder;
use grosso::run::Threshold;
use grosso::sample::write_sample;
use tracing::Level;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "grosso")]
#[command(version)]
#[command(about = "Statistically sound mining of trending sequential patterns", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report patterns whose frequency stays within a margin across datasets
    Stable {
        /// Maximum frequency gap between any two datasets
        #[arg(long)]
        alpha: f64,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Report patterns whose frequency increases from each dataset to the next
    Emerging {
        /// Minimum frequency increase between consecutive datasets
        #[arg(long)]
        epsilon: f64,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Report patterns whose frequency decreases from each dataset to the next
    Descending {
        /// Minimum frequency decrease between consecutive datasets
        #[arg(long)]
        epsilon: f64,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Compute the s-index and deviation bound of a dataset
    Bound {
        /// Dataset file
        dataset: PathBuf,

        /// Confidence parameter
        #[arg(long, default_value = "0.1", env = "GROSSO_DELTA")]
        delta: f64,
    },

    /// Compare the capacity estimate with the naive and containment bounds
    Capacity {
        /// Dataset file
        dataset: PathBuf,
    },

    /// Draw a dataset from another one, uniformly with replacement
    Sample {
        /// Source dataset file
        input: PathBuf,

        /// Output dataset file
        output: PathBuf,

        /// Number of transactions to draw (default: size of the source)
        #[arg(long)]
        size: Option<usize>,

        /// Random seed
        #[arg(long, default_value = "0")]
        seed: u64,
    },

    /// Compare reported candidates with a ground truth
    Compare {
        /// Ground-truth candidate file
        #[arg(long)]
        truth: PathBuf,

        /// Reported candidate file
        #[arg(long)]
        found: PathBuf,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Dataset files in temporal order
    #[arg(required = true)]
    datasets: Vec<PathBuf>,

    /// Confidence parameter of the whole run
    #[arg(long, default_value = "0.1", env = "GROSSO_DELTA")]
    delta: f64,

    /// Minimum frequency
    #[arg(long)]
    theta: Option<f64>,

    /// Datasets the minimum frequency applies to
    #[arg(long, value_enum, default_value = "all")]
    theta_scope: ThetaScope,

    /// Trust observed frequencies instead of bounding their deviation
    #[arg(long)]
    observed: bool,

    /// Path to the SPMF jar used to mine the anchor dataset
    #[arg(long, env = "GROSSO_MINER", conflicts_with = "patterns")]
    miner_jar: Option<PathBuf>,

    /// File of patterns mined beforehand, one `<pattern> #SUP: <support>` per line
    #[arg(long)]
    patterns: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ThetaScope {
    /// Only the mined dataset
    Anchor,
    /// Every dataset
    All,
}

enum Miner {
    Command(CommandMiner),
    File(PatternFile),
}

impl SequentialPatternMiner for Miner {
    fn mine(&self, input: &Path, min_frequency: f64) -> Result<Vec<MinedPattern>, Error> {
        match self {
            Miner::Command(miner) => miner.mine(input, min_frequency),
            Miner::File(miner) => miner.mine(input, min_frequency),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Stable { alpha, run } => mine(RunConfig::stable(alpha), run),
        Commands::Emerging { epsilon, run } => mine(RunConfig::emerging(epsilon), run),
        Commands::Descending { epsilon, run } => mine(RunConfig::descending(epsilon), run),
        Commands::Bound { dataset, delta } => bound(&dataset, delta),
        Commands::Capacity { dataset } => capacity(&dataset),
        Commands::Sample {
            input,
            output,
            size,
            seed,
        } => sample(&input, &output, size, seed),
        Commands::Compare { truth, found } => compare(&truth, &found),
    }
}

fn mine(builder: RunConfigBuilder, args: RunArgs) -> Result<()> {
    let threshold = match (args.theta, args.theta_scope) {
        (None, _) => Threshold::None,
        (Some(theta), ThetaScope::Anchor) => Threshold::Anchor(theta),
        (Some(theta), ThetaScope::All) => Threshold::All(theta),
    };
    let bound_mode = if args.observed {
        BoundMode::Observed
    } else {
        BoundMode::Statistical
    };
    let config = builder
        .delta(args.delta)
        .threshold(threshold)
        .bound_mode(bound_mode)
        .build()?;

    let miner = match (args.patterns, args.miner_jar) {
        (Some(patterns), _) => Miner::File(PatternFile::new(patterns)),
        (None, Some(jar)) => Miner::Command(CommandMiner::spmf(jar)),
        (None, None) => anyhow::bail!("either --miner-jar or --patterns must be provided"),
    };

    let report = Grosso::new(config, miner).run(&args.datasets)?;
    for (i, bound) in report.bounds().iter().enumerate() {
        info!(
            dataset = %args.datasets[i].display(),
            s_index = bound.s_index(),
            mu = bound.mu(),
            "deviation bound"
        );
    }
    info!(
        anchor = report.anchor(),
        min_frequency = report.min_frequency(),
        mined = report.num_mined(),
        reported = report.candidates().len(),
        "run finished"
    );

    match args.output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            report.write_to(BufWriter::new(file))?;
        }
        None => report.write_to(io::stdout().lock())?,
    }
    Ok(())
}

fn bound(path: &Path, delta: f64) -> Result<()> {
    let dataset = Dataset::open(path)?;
    let bound = ShatterBound::compute(&dataset, delta)?;
    println!("transactions: {}", bound.dataset_size());
    println!("s-index: {}", bound.s_index());
    println!("mu: {}", bound.mu());
    Ok(())
}

fn capacity(path: &Path) -> Result<()> {
    let dataset = Dataset::open(path)?;
    let comparison = CapacityComparison::from_dataset(&dataset);
    println!("transactions: {}", comparison.num_transactions());
    println!("gap to naive bound: {:.4}%", comparison.naive_gap_percent());
    println!(
        "gap to containment bound: {:.4}%",
        comparison.containment_gap_percent()
    );
    Ok(())
}

fn sample(input: &Path, output: &Path, size: Option<usize>, seed: u64) -> Result<()> {
    let dataset = Dataset::open(input)?;
    let size = size.unwrap_or(dataset.len());
    write_sample(&dataset, output, size, seed)?;
    info!(size, seed, output = %output.display(), "sample written");
    Ok(())
}

fn compare(truth: &Path, found: &Path) -> Result<()> {
    let report = GroundTruthReport::compare_files(truth, found)?;
    println!("found: {}", report.found());
    println!("ground truth: {}", report.truth());
    println!("false positives: {}", report.false_positives());
    println!("false positive ratio: {}", report.false_positive_ratio());
    match report.found_to_truth_ratio() {
        Some(ratio) => println!("found to ground truth ratio: {ratio}"),
        None => println!("found to ground truth ratio: undefined"),
    }
    Ok(())
}
