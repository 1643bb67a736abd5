use clap::{Args, Parser, Subcommand};
use finproj::{ChartOptions, LogTarget, commands, init_logging, load_model};
use finproj_core::chart::{AssetView, Detail, Frequency};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "finproj")]
#[command(about = "A personal finance projection engine")]
struct Cli {
    /// Path to the data directory (default: ~/.finproj/)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    log_level: String,

    /// Log to stderr instead of the data directory's log file
    #[arg(long, global = true)]
    log_stderr: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a model and report the first problem found
    Validate { model: PathBuf },
    /// Print the evaluation log as JSON
    Evaluate { model: PathBuf },
    /// Print chart series as JSON
    Chart {
        model: PathBuf,
        #[command(flatten)]
        view: ChartArgs,
    },
}

#[derive(Args, Debug)]
struct ChartArgs {
    /// coarse or fine
    #[arg(long)]
    detail: Option<Detail>,

    /// monthly or annually
    #[arg(long)]
    frequency: Option<Frequency>,

    /// value, additions, reductions or delta
    #[arg(long)]
    asset_view: Option<AssetView>,

    /// An asset name or asset category
    #[arg(long)]
    asset_focus: Option<String>,

    /// An income name or income category
    #[arg(long)]
    income_focus: Option<String>,

    /// An expense name or expense category
    #[arg(long)]
    expense_focus: Option<String>,
}

impl From<ChartArgs> for ChartOptions {
    fn from(args: ChartArgs) -> Self {
        ChartOptions {
            detail: args.detail,
            frequency: args.frequency,
            asset_view: args.asset_view,
            asset_focus: args.asset_focus,
            income_focus: args.income_focus,
            expense_focus: args.expense_focus,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".finproj")
}

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
    let target = if cli.log_stderr {
        LogTarget::Stderr
    } else {
        LogTarget::File
    };

    init_logging(&data_dir, &cli.log_level, target)?;

    match cli.command {
        Command::Validate { model } => {
            let model = load_model(&model)?;
            match finproj_core::validate(&model) {
                Ok(()) => println!("model is valid"),
                Err(e) => {
                    tracing::warn!(error = %e, "Model failed validation");
                    println!("{e}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Command::Evaluate { model } => {
            let model = load_model(&model)?;
            let evaluations = commands::evaluate(&model)?;
            println!("{}", serde_json::to_string_pretty(&evaluations)?);
        }
        Command::Chart { model, view } => {
            let model = load_model(&model)?;
            let data = commands::chart(&model, &view.into())?;
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
    }

    tracing::info!("finproj finished");
    Ok(ExitCode::SUCCESS)
}
