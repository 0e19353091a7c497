pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

#[derive(Debug, Parser)]
#[command(
    name = "fixtura",
    about = "Fixtura operator CLI",
    long_about = "Classify plan objects into sanitary fixture types and preview quote totals.",
    after_help = "Examples:\n  fixtura detect plan.json --json\n  fixtura preview items.json --tax-rate 20 --global-discount 5\n  fixtura config"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Classify a parsed plan's objects into fixture types with confidences")]
    Detect {
        #[arg(help = "Parsed-plan JSON file; omit to classify the built-in sample plan")]
        file: Option<PathBuf>,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Compute one-off quote totals from a line-items JSON file")]
    Preview {
        #[arg(help = "Line-items JSON file")]
        file: PathBuf,
        #[arg(long, help = "Tax rate percentage; wins over the file's taxRate")]
        tax_rate: Option<Decimal>,
        #[arg(long, help = "Global discount percentage; wins over the file's globalDiscount")]
        global_discount: Option<Decimal>,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Detect { file, json } => commands::detect::run(file.as_deref(), json),
        Command::Preview { file, tax_rate, global_discount } => {
            commands::preview::run(&file, tax_rate, global_discount)
        }
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
