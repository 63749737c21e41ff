use anyhow::Context;
use clap::Parser;
use fixture_chain::{
    CallSite, CallTracer, Fixture, GraphTracer, NoopTracer, run_callgrind_program,
};
use fixture_cli::{LogArgs, print_error, print_graph};
use std::str::FromStr;

/// Run the counter-driven call-chain fixtures.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Run a single fixture instead of the whole test program.
    #[arg(long, value_parser = CallSite::from_str)]
    entry: Option<CallSite>,

    /// Starting counter for `--entry`.
    #[arg(long, default_value_t = 0, requires = "entry", allow_negative_numbers = true)]
    counter: i32,

    /// Trace the run and print the call graph a profiler should report.
    #[arg(long)]
    graph: bool,

    /// Print the call graph as JSON. Implies `--graph`.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    log: LogArgs,
}

fn main() {
    let args = Args::parse();
    args.log.setup_logger();
    if let Err(e) = run(&args) {
        print_error(e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    if args.graph || args.json {
        let mut fixture = Fixture::with_tracer(GraphTracer::new());
        run_fixture(&mut fixture, args);
        let graph = fixture.into_tracer().into_graph();
        print_graph(&graph, args.json).context("could not print call graph")?;
    } else {
        run_fixture(&mut Fixture::<NoopTracer>::new(), args);
    }
    Ok(())
}

fn run_fixture<T: CallTracer>(fixture: &mut Fixture<T>, args: &Args) {
    match args.entry {
        None => {
            println!("Starting callgrind test program");
            for checkpoint in run_callgrind_program(fixture) {
                println!(
                    "After {}: counter = {}",
                    checkpoint.entry, checkpoint.counter
                );
            }
        }
        Some(entry) => {
            fixture.reset(args.counter, 0);
            let result = fixture.call(entry);
            println!("After {entry}: counter = {}", fixture.counter());
            if let Some(result) = result {
                println!("   Result: {result}");
            }
        }
    }
}
