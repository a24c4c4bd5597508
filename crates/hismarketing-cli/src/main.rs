use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use hismarketing_core::analytics::ReportRequest;

mod commands;
mod context;
mod logging;
mod terminal;

use commands::auth::RegisterArgs;
use commands::run::RunArgs;
use context::{AppContext, GlobalOptions, Settings};

#[derive(Parser)]
#[command(name = "hismarketing", version)]
#[command(about = "HisMarketing - sales analytics client", long_about = None)]
struct Cli {
    /// Root directory for config, session, logs and reports
    #[arg(long, global = true, value_name = "DIR", env = "HISMARKETING_HOME")]
    home: Option<PathBuf>,

    /// Backend base URL (overrides config and HISMARKETING_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Directory where downloaded reports are saved
    #[arg(long, global = true, value_name = "DIR")]
    report_dir: Option<PathBuf>,

    /// Show log output on the console
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session
    Login {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account and log in
    Register {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        password_confirm: Option<String>,
    },
    /// Remove the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Upload a file, analyze it, forecast and optionally download reports
    Run {
        /// Sales data (.xlsx, .xls or .csv)
        file: PathBuf,
        /// Report to download afterwards: pdf, excel or <format>:<analysis|prediction>
        #[arg(long = "report", value_name = "FORMAT[:KIND]", value_parser = commands::parse_report)]
        reports: Vec<ReportRequest>,
        /// Skip the forecast stage
        #[arg(long)]
        skip_prediction: bool,
        /// Disable cosmetic delays (progress hold, minimum prediction time)
        #[arg(long)]
        no_pacing: bool,
    },
    /// Interactive dashboard shell
    Shell,
}

async fn dispatch(command: Commands, settings: Settings) -> Result<ExitCode> {
    let immediate = matches!(command, Commands::Run { no_pacing: true, .. });
    let ctx = AppContext::build(settings, immediate)?;

    match command {
        Commands::Login { email, password } => commands::auth::login(&ctx, email, password).await,
        Commands::Register {
            name,
            email,
            company,
            password,
            password_confirm,
        } => {
            let args = RegisterArgs {
                name,
                email,
                company,
                password,
                password_confirm,
            };
            commands::auth::register(&ctx, args).await
        }
        Commands::Logout => commands::auth::logout(&ctx),
        Commands::Whoami => commands::auth::whoami(&ctx),
        Commands::Run {
            file,
            reports,
            skip_prediction,
            no_pacing: _,
        } => {
            let args = RunArgs {
                file: &file,
                reports: &reports,
                skip_prediction,
            };
            commands::run::run(&ctx, args).await
        }
        Commands::Shell => commands::shell::run(&ctx).await,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let options = GlobalOptions {
        home: cli.home,
        api_url: cli.api_url,
        report_dir: cli.report_dir,
    };
    let settings = match Settings::load(&options) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = logging::init(
        settings.paths.logs_dir().ok(),
        &settings.config.logging.level,
        cli.verbose,
    );

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("{} failed to start runtime: {err}", "error:".red().bold());
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(dispatch(cli.command, settings)) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("[CLI] {:#}", err);
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
