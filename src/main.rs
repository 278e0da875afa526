use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use log::{error, info, warn};

use marl_survey::estimator::EstimateReport;
use marl_survey::report::{render_estimates, render_tag_summary, ReportConfig};
use marl_survey::survey::{AgentDims, Device, ModelCatalogue, RunContext, SurveyConfig, SurveyPlan};
use marl_survey::tagging::{tag_runs, RunTracker, TagMode};
use marl_survey::tracker::LocalRunStore;
use marl_survey::Result;

#[derive(Parser)]
#[command(name = "marl-survey")]
#[command(about = "Multi-agent RL model survey tooling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add architecture tags to existing tracked runs
    TagRuns(TagRunsArgs),
    /// Estimate parameter counts of the balanced survey models
    Params(ParamsArgs),
    /// List the experiments of a survey
    Plan(PlanArgs),
}

#[derive(Args)]
struct TagRunsArgs {
    /// Project name (e.g. benchmarl-2025-10-31)
    #[arg(long)]
    project: String,

    /// Entity / user owning the project
    #[arg(long)]
    entity: Option<String>,

    /// Actually update the runs (default is dry-run mode)
    #[arg(long, default_value_t = false)]
    no_dry_run: bool,

    /// Root directory of the run store
    #[arg(long, value_name = "DIR", env = "MARL_SURVEY_STORE", default_value = "runs")]
    store: PathBuf,

    /// Print the summary as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args)]
struct ParamsArgs {
    /// Observation features per agent
    #[arg(long, default_value_t = 18)]
    obs_dim: usize,

    /// Action dimension per agent
    #[arg(long, default_value_t = 2)]
    action_dim: usize,

    /// Number of agents
    #[arg(long, default_value_t = 3)]
    n_agents: usize,

    /// Print the report as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args)]
struct PlanArgs {
    /// Survey configuration (JSON); defaults reproduce the full survey
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host name used in experiment names
    #[arg(long, env = "HOSTNAME", default_value = "localhost")]
    host: String,

    /// Number of visible CUDA devices
    #[arg(long, default_value_t = 0)]
    cuda_devices: u32,

    /// Preferred CUDA device index
    #[arg(long, default_value_t = 1)]
    cuda_index: u32,

    /// Print the plan as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::TagRuns(args) => run_tag_runs(args),
        Commands::Params(args) => run_params(args),
        Commands::Plan(args) => run_plan(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run_tag_runs(args: TagRunsArgs) -> Result<()> {
    let mode = TagMode::from_dry_run(!args.no_dry_run);
    if mode.is_dry_run() {
        warn!("running in DRY RUN mode; use --no-dry-run to update tags");
    }

    let store = LocalRunStore::open(&args.store);
    let mut runs = store.list_runs(&args.project, args.entity.as_deref())?;
    info!("found {} runs in project {}", runs.len(), args.project);

    // Per-run failures are part of the summary, not the exit status
    let summary = tag_runs(&mut runs, mode);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render_tag_summary(&summary));
    }
    Ok(())
}

fn run_params(args: ParamsArgs) -> Result<()> {
    let dims = AgentDims {
        n_agents: args.n_agents,
        obs_dim: args.obs_dim,
        action_dim: args.action_dim,
    };
    let catalogue = ModelCatalogue::balanced(dims)?;
    let report = EstimateReport::from_topologies(&catalogue.topologies());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let config = ReportConfig {
            dims,
            ..Default::default()
        };
        print!("{}", render_estimates(&report, &config));
    }
    Ok(())
}

fn run_plan(args: PlanArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => SurveyConfig::from_file(path)?,
        None => SurveyConfig::default(),
    };

    let context = RunContext {
        date: chrono::Local::now().date_naive(),
        host: args.host,
        device: Device::select(args.cuda_devices, args.cuda_index),
    };
    info!("using device {}", context.device);

    let catalogue = ModelCatalogue::balanced(AgentDims::default())?;
    let plan = SurveyPlan::new(&config, &catalogue, &context)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        for experiment in &plan.experiments {
            println!("{}  group={}  tags={}", experiment.name, experiment.group, experiment.tags.join(","));
        }
        println!("{} experiments for project {}", plan.len(), plan.project);
    }
    Ok(())
}
