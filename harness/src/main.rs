use clap::{Parser, Subcommand};
use gate::{Category, ConfigValidator, HarnessConfig, Validator};
use harness::{ArithmeticCase, CaseRegistry, HomepageTitleCase, Runner, StatusPayloadCase};
use regex::Regex;
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(name = "testgate")]
#[command(about = "A category-gated test execution harness")]
struct Cli {
    /// Path to a harness configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the registered cases through the gate
    Run {
        /// Only run cases whose name matches this regex
        #[arg(short, long)]
        filter: Option<String>,
        /// Allow a category, overriding the configured allow-set (repeatable)
        #[arg(short, long)]
        allow: Vec<String>,
        /// Stop after the first failed or errored case
        #[arg(long)]
        fail_fast: bool,
        /// Write the JSON report to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List registered cases and their categories
    List,
    /// Show the effective allowed categories
    Categories,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => HarnessConfig::from_path(path)?,
        None => HarnessConfig::default(),
    };

    match cli.command {
        Commands::Run {
            filter,
            allow,
            fail_fast,
            output,
        } => {
            let mut config = config;
            if fail_fast {
                config = config.with_fail_fast(true);
            }
            if !allow.is_empty() {
                config = config
                    .with_allowed_categories(allow.iter().map(Category::new).collect());
            }
            if let Some(path) = output {
                config = config.with_report_path(path);
            }
            run_cases(config, filter.as_deref())?;
        }
        Commands::List => {
            list_cases(&sample_registry()?);
        }
        Commands::Categories => {
            show_categories(&config);
        }
    }

    Ok(())
}

fn sample_registry() -> Result<CaseRegistry, Box<dyn std::error::Error>> {
    let mut registry = CaseRegistry::new();
    registry.register(Box::new(ArithmeticCase))?;
    registry.register(Box::new(StatusPayloadCase))?;
    registry.register(Box::new(HomepageTitleCase))?;
    Ok(registry)
}

fn run_cases(
    config: HarnessConfig,
    filter: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut runner = Runner::new(config);
    if let Some(pattern) = filter {
        let regex = Regex::new(pattern)?;
        runner = runner.with_filter(regex);
    }

    let mut registry = sample_registry()?;
    let report = match runner.run(&mut registry) {
        Ok(report) => report,
        Err(e) => {
            error!("run aborted: {e}");
            return Err(e.into());
        }
    };

    println!("run {}", report.run_id);
    for record in report.records() {
        let duration = record
            .duration
            .map(|d| format!(" ({d:.2?})"))
            .unwrap_or_default();
        println!(
            "  {} [{}] ... {}{}",
            record.name, record.category, record.outcome, duration
        );
        if let Some(message) = &record.message {
            println!("      {message}");
        }
    }
    println!("\n{report}");

    if !report.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

fn list_cases(registry: &CaseRegistry) {
    println!("Registered cases:");
    for case in registry.iter() {
        println!("  - {} [{}]", case.name(), case.category());
    }
}

fn show_categories(config: &HarnessConfig) {
    let validator = ConfigValidator::from_config(config);
    println!("Effective allowed categories:");
    for category in [
        Category::unit(),
        Category::integration(),
        Category::api(),
        Category::browser(),
    ] {
        let mark = if validator.is_allowed(&category) {
            "allowed"
        } else {
            "gated"
        };
        println!("  {category}: {mark}");
    }
}
