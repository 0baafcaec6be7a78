//! Benchmark driver: load a roadmap, run all five solvers and write the
//! result files the evaluation scripts consume.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use log::{error, info, warn};

use marga_plan::config::{InputConfig, OutputConfig, RunConfig, SearchConfig};
use marga_plan::graph::load::{load_roadmap, RoadmapFiles};
use marga_plan::io::{write_failure_indicator, write_statistics, write_trajectory, SolverStats};
use marga_plan::search::{
    MaxSuccessExactSolver, MaxSuccessGreedySolver, MinRiskExactSolver, MinRiskGreedySolver,
    ShortestPathSolver,
};
use marga_plan::utils::SearchTimer;
use marga_plan::{PlannerError, Result};

#[derive(Parser, Debug)]
#[command(name = "marga-plan", about = "Label-aware roadmap search benchmark")]
struct Args {
    /// TOML run configuration; individual flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Samples file (node states, start and goals)
    #[arg(long)]
    samples: Option<PathBuf>,

    /// Roadmap edge file
    #[arg(long)]
    roadmap: Option<PathBuf>,

    /// Label weight table file
    #[arg(long)]
    label_weights: Option<PathBuf>,

    /// Most-promising-labels hint file
    #[arg(long)]
    most_promising_labels: Option<PathBuf>,

    /// Number of regular samples; later nodes are goals
    #[arg(long)]
    nsamples: Option<usize>,

    /// Number of target-pose hypotheses
    #[arg(long)]
    n_hypotheses: Option<u32>,

    /// Output directory for trajectories and statistics
    #[arg(long)]
    output: Option<PathBuf>,
}

fn resolve_config(args: Args) -> Result<RunConfig> {
    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => {
            let missing = |flag: &str| {
                PlannerError::Config(format!("--{flag} is required when no --config is given"))
            };
            RunConfig {
                inputs: InputConfig {
                    samples: args.samples.clone().ok_or_else(|| missing("samples"))?,
                    roadmap: args.roadmap.clone().ok_or_else(|| missing("roadmap"))?,
                    label_weights: args
                        .label_weights
                        .clone()
                        .ok_or_else(|| missing("label-weights"))?,
                    most_promising_labels: args.most_promising_labels.clone(),
                    nsamples: args.nsamples.ok_or_else(|| missing("nsamples"))?,
                },
                output: OutputConfig::default(),
                search: SearchConfig::default(),
            }
        }
    };

    if let Some(samples) = args.samples {
        config.inputs.samples = samples;
    }
    if let Some(roadmap) = args.roadmap {
        config.inputs.roadmap = roadmap;
    }
    if let Some(label_weights) = args.label_weights {
        config.inputs.label_weights = label_weights;
    }
    if let Some(most_promising) = args.most_promising_labels {
        config.inputs.most_promising_labels = Some(most_promising);
    }
    if let Some(nsamples) = args.nsamples {
        config.inputs.nsamples = nsamples;
    }
    if let Some(n_hypotheses) = args.n_hypotheses {
        if n_hypotheses == 0 {
            return Err(PlannerError::Config(
                "--n-hypotheses must be at least 1".into(),
            ));
        }
        config.search.n_hypotheses = n_hypotheses;
    }
    if let Some(output) = args.output {
        config.output.directory = output;
    }

    Ok(config)
}

fn run(args: Args) -> Result<()> {
    let config = resolve_config(args)?;
    fs::create_dir_all(&config.output.directory)?;

    let files = RoadmapFiles {
        samples: &config.inputs.samples,
        roadmap: &config.inputs.roadmap,
        label_weights: &config.inputs.label_weights,
        most_promising_labels: config.inputs.most_promising_labels.as_deref(),
    };
    let mut timer = SearchTimer::start();
    let roadmap = load_roadmap(&files, config.inputs.nsamples)?;
    info!("[Main] roadmap loaded in {:.3}s", timer.elapsed_secs());

    let start = roadmap.start();
    let goal_set = roadmap.goal_set().to_vec();

    timer.reset();
    let astar = ShortestPathSolver::new(&roadmap, start, goal_set.clone()).search();
    info!("[Main] shortest-path search: {:.3}s", timer.elapsed_secs());

    timer.reset();
    let min_risk_greedy = MinRiskGreedySolver::new(&roadmap, start, goal_set.clone()).search();
    info!("[Main] min-risk greedy search: {:.3}s", timer.elapsed_secs());

    timer.reset();
    let min_risk_exact = MinRiskExactSolver::new(&roadmap, start, goal_set).search();
    info!("[Main] min-risk exact search: {:.3}s", timer.elapsed_secs());

    timer.reset();
    let max_success_greedy = MaxSuccessGreedySolver::new(&roadmap).search();
    info!(
        "[Main] max-success greedy search: {:.3}s",
        timer.elapsed_secs()
    );

    timer.reset();
    let max_success_exact = MaxSuccessExactSolver::new(&roadmap).search();
    info!(
        "[Main] max-success exact search: {:.3}s",
        timer.elapsed_secs()
    );

    let outcomes = [
        &astar,
        &min_risk_greedy,
        &min_risk_exact,
        &max_success_greedy,
        &max_success_exact,
    ];
    let any_failed = outcomes.iter().any(|o| o.failed);

    let dir = &config.output.directory;
    write_failure_indicator(&dir.join("failureIndicator.txt"), any_failed)?;
    if any_failed {
        warn!("[Main] at least one solver failed; statistics withheld");
        return Ok(());
    }

    let n_hypotheses = config.search.n_hypotheses;
    let rows: Vec<SolverStats> = outcomes
        .iter()
        .map(|o| SolverStats::new(o, o.verdict(n_hypotheses)))
        .collect();
    write_statistics(&dir.join("statistics.txt"), &rows)?;

    write_trajectory(&dir.join("Astartraj.txt"), &astar.trajectory)?;
    write_trajectory(&dir.join("MCRGtraj.txt"), &min_risk_greedy.trajectory)?;
    write_trajectory(&dir.join("MCREtraj.txt"), &min_risk_exact.trajectory)?;
    write_trajectory(&dir.join("MSGtraj.txt"), &max_success_greedy.trajectory)?;
    write_trajectory(&dir.join("MSEtraj.txt"), &max_success_exact.trajectory)?;
    info!("[Main] results written to {}", dir.display());

    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(err) = run(Args::parse()) {
        error!("[Main] {err}");
        std::process::exit(1);
    }
}
