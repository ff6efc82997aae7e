mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod notify;
mod report;

use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::{FieldwatchError, Result};
use logic::schedule;
use logic::{Evaluator, RefreshService};
use models::Policy;
use notify::SlackNotifier;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Some(Commands::Init) => {
            Config::setup_interactive()?;
            Ok(())
        }
        Some(Commands::Check) => run_check(&cli).await,
        None => run_once(&cli).await,
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    // First run with no config anywhere: walk through setup instead of failing.
    if cli.config.is_none() && !Config::exists(None) {
        let (config, _) = Config::setup_interactive()?;
        return Ok(config);
    }
    match Config::load(cli.config.clone()) {
        Ok(c) => Ok(c),
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Run `fieldwatch init` to create a configuration.");
            std::process::exit(1);
        }
    }
}

async fn run_check(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;

    match Policy::load(&config.policy.path) {
        Ok(policy) => println!("Policy: OK ({} rules)", policy.rules.len()),
        Err(e) => println!("Policy: INVALID ({})", e),
    }

    let service = RefreshService::new(&config)?;
    match service.test_connection().await {
        Ok(true) => println!("NWS: OK"),
        Ok(false) => println!("NWS: UNREACHABLE"),
        Err(e) => println!("NWS: ERROR ({})", e),
    }

    match config.slack {
        Some(slack) => match SlackNotifier::new(slack) {
            Ok(_) => println!("Slack: configured"),
            Err(e) => println!("Slack: {}", e),
        },
        None => println!("Slack: not configured"),
    }

    Ok(())
}

async fn run_once(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let policy = Policy::load(&config.policy.path)?;
    let service = RefreshService::new(&config)?;

    let bundle = match service.refresh().await {
        Ok(bundle) => bundle,
        Err(e) => {
            // A failed pass shows no partial data for any display area.
            eprintln!("Error loading NWS data: {}", e);
            eprintln!("Unable to load current conditions.");
            eprintln!("Unable to load forecast.");
            std::process::exit(1);
        }
    };

    let now = chrono::Local::now().naive_local();
    let chances = logic::precip::chances_by_period(&bundle.periods, &bundle.hourly);

    println!("{}", report::conditions_section(&bundle.snapshot));
    println!();
    println!("{}", report::practice_line(schedule::next_practice(now)));
    println!();
    println!("{}", report::forecast_section(&bundle.periods, &chances));
    println!();

    if !schedule::monitoring_active(now) && !cli.force {
        println!("No weather alerts monitored at this time.");
        return Ok(());
    }

    let evaluator = Evaluator::new(config.monitor.lookahead_periods);
    let outcome = evaluator.evaluate(&policy, &bundle);
    println!("{}", report::outcome_section(&outcome));

    if cli.notify {
        let slack = config.slack.ok_or_else(|| {
            FieldwatchError::Config("Slack is not configured - run `fieldwatch init`".into())
        })?;
        let notifier = SlackNotifier::new(slack)?;
        match notifier.send(&report::notification_text(&outcome)).await {
            Ok(receipt) => println!("Notification delivered (ts {})", receipt.ts),
            Err(e) => eprintln!("{}", e),
        }
    }

    Ok(())
}
