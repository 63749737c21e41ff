use anyhow::Context;
use clap::{CommandFactory, Parser};
use fixture_cli::{LogArgs, print_error};
use fixture_hw::{SimConfig, run_simulation};
use std::path::PathBuf;

/// Run the stub hardware simulation.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON simulation config. Every field is optional; `{}` runs the defaults.
    config_file: Option<PathBuf>,

    /// Override the number of cycles from the config file.
    #[arg(long)]
    cycles: Option<u32>,

    /// Print the final report as JSON.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    log: LogArgs,
}

fn main() {
    let args = Args::parse();
    args.log.setup_logger();
    println!("Hardware Simulation Starting...");

    let Some(config_file) = &args.config_file else {
        println!("{}", Args::command().render_usage());
        std::process::exit(-1);
    };
    let mut config = match SimConfig::load(config_file) {
        Ok(config) => config,
        Err(e) => {
            print_error(e.context("could not load simulation config"));
            std::process::exit(-1);
        }
    };
    if let Some(cycles) = args.cycles {
        config.cycles = cycles;
    }
    tracing::info!(
        "loaded {} ({} cycles, advanced after {})",
        config_file.display(),
        config.cycles,
        config.advanced_after
    );

    let report = match run_simulation(&config) {
        Ok(report) => report,
        Err(e) => {
            println!("Hardware initialization failed");
            let code = e.code();
            print_error(anyhow::Error::new(e));
            std::process::exit(code);
        }
    };

    tracing::info!(
        cycles = report.cycles_run,
        error_cycle = ?report.error_cycle,
        timer_ticks = report.timer_ticks,
        "simulation finished"
    );

    if args.json {
        match serde_json::to_string_pretty(&report).context("could not serialize report") {
            Ok(json) => println!("{json}"),
            Err(e) => {
                print_error(e);
                std::process::exit(1);
            }
        }
    }
    println!("Simulation completed successfully");
}
