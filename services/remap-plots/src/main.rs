//! Remap metrics plotting CLI.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use metrics_loader::{DatasetKey, MetricsLocator, Resolved, DEFAULT_METRICS_ROOT};
use remap_common::{GridPairing, Mesh, Method, Variable, Variant};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use remap_plots::{format_grids, format_locate, PlotDriver, PlotPlan, SummaryReport};

/// Remap metrics comparison charts
#[derive(Parser, Debug)]
#[command(name = "remap-plots")]
#[command(about = "Render remapping scheme comparison charts from metrics archives", long_about = None)]
struct Cli {
    /// Log level
    #[arg(long, global = true, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty, env = "REMAP_PLOTS_LOG_FORMAT")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the charts of a plot plan
    Run {
        /// Path to plan YAML file (built-in paper plan when omitted)
        #[arg(short, long, env = "REMAP_PLOTS_PLAN")]
        plan: Option<PathBuf>,

        /// Override the metrics archive root
        #[arg(long)]
        metrics_root: Option<PathBuf>,

        /// Override the PNG output directory (must exist)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Open charts in a viewer instead of writing PNGs
        #[arg(long)]
        interactive: bool,

        /// Render combinations in parallel
        #[arg(long)]
        parallel: bool,

        /// Stop after the first failed combination
        #[arg(long)]
        fail_fast: bool,

        /// Summary format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },

    /// Print where a dataset is expected and whether it exists
    Locate {
        /// Method name (TempestRemap, GMLS, WLS-ENOR, ESMF) or index
        method: Method,

        /// Variable name or index
        variable: Variable,

        /// Method order
        order: u8,

        /// Grid pairing for uniform meshes
        #[arg(long, default_value = "CS-MPAS")]
        pairing: GridPairing,

        /// Use the regionally refined meshes
        #[arg(long)]
        rrm: bool,

        /// Source resolution index
        #[arg(long, default_value_t = 0)]
        src: u8,

        /// Target resolution index
        #[arg(long, default_value_t = 0)]
        tgt: u8,

        /// Dataset variant (default, caas)
        #[arg(long, default_value = "default")]
        variant: Variant,

        /// Metrics archive root
        #[arg(long, default_value = DEFAULT_METRICS_ROOT, env = "METRICS_ROOT")]
        metrics_root: PathBuf,
    },

    /// Print the mesh resolution tables
    Grids,
}

fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_format);

    match execute(cli.command) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(log_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

fn execute(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Run {
            plan,
            metrics_root,
            output_dir,
            interactive,
            parallel,
            fail_fast,
            output,
        } => {
            let mut plan = match plan {
                Some(path) => {
                    info!(path = %path.display(), "Loading plot plan");
                    PlotPlan::from_file(&path)?
                }
                None => {
                    info!("No plan file given, using the built-in paper plan");
                    PlotPlan::paper()
                }
            };
            plan.apply_overrides(metrics_root, output_dir, interactive, parallel, fail_fast);
            plan.validate()?;

            info!(
                metrics_root = %plan.metrics_root.display(),
                output_dir = %plan.output_dir.display(),
                "Plot plan ready"
            );

            let driver = PlotDriver::from_plan(&plan);
            let summary = driver.run(&plan)?;

            match output {
                OutputFormat::Table => println!("{}", SummaryReport::format_table(&summary)),
                OutputFormat::Json => println!("{}", SummaryReport::format_json(&summary)?),
            }

            if summary.has_failures() {
                error!(
                    failed = summary.failures.len(),
                    combinations = summary.combinations,
                    "Some combinations failed"
                );
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Commands::Locate {
            method,
            variable,
            order,
            pairing,
            rrm,
            src,
            tgt,
            variant,
            metrics_root,
        } => {
            let mesh = if rrm {
                Mesh::regionally_refined(src, tgt)?
            } else {
                Mesh::uniform(pairing, src, tgt)?
            };
            let key = DatasetKey::new(method, mesh, variable, order, variant)?;
            let locator = MetricsLocator::new(metrics_root);
            let resolved = locator.resolve(&key);
            println!("{}", format_locate(&locator.path_for(&key), &resolved));

            match resolved {
                Resolved::Found { .. } => Ok(ExitCode::SUCCESS),
                Resolved::Missing { .. } => Ok(ExitCode::FAILURE),
            }
        }
        Commands::Grids => {
            println!("{}", format_grids());
            Ok(ExitCode::SUCCESS)
        }
    }
}
