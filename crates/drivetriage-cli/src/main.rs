//! CLI for drivetriage — batch SMART health triage for used drives.

mod commands;
mod csv;
mod deps;
mod device;
mod display;
mod smartctl;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "drivetriage")]
#[command(about = "Batch health triage for used SATA drives over USB-SATA")]
#[command(version = drivetriage_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List block devices that look like candidate test targets
    Scan,

    /// Test drives interactively and append each result to a CSV batch file
    Test {
        /// Test a single device non-interactively (e.g. /dev/sdb)
        #[arg(long)]
        device: Option<String>,

        /// CSV output path (default: drivetriage_results_<timestamp>.csv)
        #[arg(long)]
        output: Option<String>,

        /// Attribute 241 magnitude cutoff between LBA and GB readings
        #[arg(long, default_value_t = 100_000)]
        write_unit_threshold: i64,
    },

    /// Evaluate a saved `smartctl -x -j` capture offline
    Report {
        /// Path to the JSON capture
        path: String,

        /// Print the full health record as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Append the result row to this CSV file
        #[arg(long)]
        output: Option<String>,

        /// Attribute 241 magnitude cutoff between LBA and GB readings
        #[arg(long, default_value_t = 100_000)]
        write_unit_threshold: i64,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scan => commands::scan::run(),
        Commands::Test {
            device,
            output,
            write_unit_threshold,
        } => commands::test::run(device.as_deref(), output.as_deref(), write_unit_threshold),
        Commands::Report {
            path,
            json,
            output,
            write_unit_threshold,
        } => commands::report::run(&path, json, output.as_deref(), write_unit_threshold),
    }
}
