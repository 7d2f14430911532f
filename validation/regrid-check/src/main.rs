//! Backend cross-check CLI for the swath regridder.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use swath_regrid::RegridConfig;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use regrid_check::{run_check, CheckRequest, CheckResults, ResultsReport, SwathKind, SwathShape};

#[derive(Parser)]
#[command(name = "regrid-check")]
#[command(about = "Cross-check the regridding backends on synthetic swaths", long_about = None)]
struct Cli {
    /// Log level
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Regrid a generated swath with both backends
    Run {
        /// Number of profiles
        #[arg(short, long, default_value = "2000")]
        profiles: usize,

        /// Number of levels per profile
        #[arg(short, long, default_value = "125")]
        levels: usize,

        /// Blank every n-th sample (0 keeps all)
        #[arg(long, default_value = "0")]
        invalid_every: usize,

        /// Use jittered profile spacing instead of a radar curtain
        #[arg(long)]
        irregular: bool,

        /// Seed for the synthetic noise
        #[arg(long, default_value = "42")]
        seed: u32,

        /// Destination cells along the first axis
        #[arg(long, default_value = "300")]
        nx: usize,

        /// Destination cells along the second axis
        #[arg(long, default_value = "100")]
        nz: usize,

        /// Largest accepted difference between backend means
        #[arg(long, default_value = "0.0001")]
        tolerance: f32,

        /// Timed runs per backend
        #[arg(long, default_value = "3")]
        repeats: u32,

        /// Output format: table (default), json
        #[arg(short, long, default_value = "table")]
        output: String,
    },

    /// Run a check from a request file
    Request {
        /// Path to request YAML file
        #[arg(short, long)]
        file: PathBuf,

        /// Override timed runs per backend
        #[arg(long)]
        repeats: Option<u32>,

        /// Output format: table (default), json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let (request, output) = match cli.command {
        Commands::Run {
            profiles,
            levels,
            invalid_every,
            irregular,
            seed,
            nx,
            nz,
            tolerance,
            repeats,
            output,
        } => {
            let request = CheckRequest {
                name: "run".to_string(),
                description: String::new(),
                swath: SwathShape {
                    kind: if irregular {
                        SwathKind::Irregular
                    } else {
                        SwathKind::Curtain
                    },
                    profiles,
                    levels,
                    invalid_every,
                    seed,
                },
                destination: None,
                cells: (nx, nz),
                regrid: RegridConfig::from_env(),
                tolerance,
                repeats,
            };
            (request, output)
        }
        Commands::Request {
            file,
            repeats,
            output,
        } => {
            info!(file = %file.display(), "Loading request");
            let mut request = CheckRequest::from_file(&file)?;
            if let Some(r) = repeats {
                request.repeats = r;
            }
            (request, output)
        }
    };

    let results = run_check(&request)?;
    print_results(&results, &output)?;

    if !results.passed() {
        anyhow::bail!("backends disagree on {}", results.name);
    }
    Ok(())
}

fn print_results(results: &CheckResults, output: &str) -> anyhow::Result<()> {
    match output {
        "json" => println!("{}", ResultsReport::format_json(results)?),
        _ => println!("{}", ResultsReport::format_table(results)),
    }
    Ok(())
}
