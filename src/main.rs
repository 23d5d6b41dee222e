use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use truck_investment_analyzer::app::{self, AppError, Session};
use truck_investment_analyzer::config::{self, DEFAULT_CONFIG_PATH};
use truck_investment_analyzer::i18n::{self, keys, Translator};
use truck_investment_analyzer::sensitivity::TripRange;
use truck_investment_analyzer::ui_cli::{self, DEFAULT_REPORT_PATH};

#[derive(Parser, Debug)]
#[command(
    name = "truck_investment_cli",
    about = "Truck + trailer investment analysis from the command line",
    version
)]
struct Cli {
    /// Path to config.toml (created with defaults when missing)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Load the scenario from a separate TOML file instead of the config
    #[arg(long, global = true)]
    scenario: Option<PathBuf>,
    /// Language code: ko, en, es or auto
    #[arg(long, global = true, default_value = "auto")]
    lang: String,
    /// Override trips per month
    #[arg(long, global = true)]
    trips: Option<u32>,
    /// Override the freight rate per m³
    #[arg(long, global = true)]
    rate: Option<f64>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print cashflow, score and findings (default command)
    Analyze(AnalyzeArgs),
    /// Print the loan amortization schedule
    Schedule(ScheduleArgs),
    /// Print the trips-per-month sensitivity table
    Sensitivity(SensitivityArgs),
    /// Write the full report to a file
    Report(ReportArgs),
    /// Start the interactive menu
    Interactive,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Toml,
}

#[derive(Args, Debug, Default)]
struct AnalyzeArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Args, Debug)]
struct ScheduleArgs {
    /// Print only the first N months
    #[arg(long)]
    months: Option<usize>,
}

#[derive(Args, Debug)]
struct SensitivityArgs {
    /// First trips/month value (defaults to the window around the current value)
    #[arg(long, requires = "to")]
    from: Option<u32>,
    /// Last trips/month value
    #[arg(long, requires = "from")]
    to: Option<u32>,
    /// Step between values
    #[arg(long, default_value_t = 1)]
    step: u32,
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Output file
    #[arg(long, default_value = DEFAULT_REPORT_PATH)]
    out: PathBuf,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 선택한 명령을 실행한다.
fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match try_run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: Cli) -> Result<(), AppError> {
    let cfg = config::load_or_default(&cli.config)?;
    let mut input = match &cli.scenario {
        Some(path) => config::load_scenario(path)?,
        None => cfg.scenario.clone(),
    };
    if let Some(trips) = cli.trips {
        input.trips_per_month = trips;
    }
    if let Some(rate) = cli.rate {
        input.rate_per_unit = rate;
    }

    let lang = i18n::resolve_language(&cli.lang, Some(&cfg.language));
    let tr = Translator::new_with_pack(&lang, cfg.pack_dir());
    let mut session = Session::new(cfg, cli.config, input, tr);

    match cli.command.unwrap_or(Command::Analyze(AnalyzeArgs::default())) {
        Command::Analyze(args) => {
            let analysis = session.evaluate()?;
            match args.format {
                OutputFormat::Text => {
                    ui_cli::print_summary(&analysis, &session.tr, &session.config.currency)
                }
                OutputFormat::Toml => println!("{}", toml::to_string_pretty(&analysis)?),
            }
        }
        Command::Schedule(args) => {
            let analysis = session.evaluate()?;
            ui_cli::print_schedule(&analysis.schedule, &session.tr, args.months);
        }
        Command::Sensitivity(args) => {
            let range = match (args.from, args.to) {
                (Some(from), Some(to)) => TripRange::stepped(from, to, args.step)?,
                _ => session.default_range(),
            };
            let analysis = session.evaluate_with_range(&range)?;
            ui_cli::print_sensitivity(&analysis.sensitivity, &session.tr, &session.config.currency);
        }
        Command::Report(args) => {
            session.write_report(&args.out)?;
            println!("{} {}", session.tr.t(keys::REPORT_SAVED), args.out.display());
        }
        Command::Interactive => app::run(&mut session)?,
    }
    Ok(())
}
