use anyhow::Context;
use clap::Parser;
use fixture_chain::{CallTracer, GraphTracer, NoopTracer, helper};
use fixture_cli::{LogArgs, print_error, print_graph};

/// Compare a direct call chain with one routed through a helper trampoline.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
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
    println!("=== Helper Function Test ===");
    if args.graph || args.json {
        let mut tracer = GraphTracer::new();
        run_chains(&mut tracer);
        print_graph(&tracer.into_graph(), args.json).context("could not print call graph")?;
    } else {
        run_chains(&mut NoopTracer);
    }
    Ok(())
}

fn run_chains<T: CallTracer>(tracer: &mut T) {
    // main -> normal_a -> normal_b
    println!("\n1. Normal call chain:");
    println!("   Result: {}", helper::normal_a(tracer));

    // main -> func_a -> helper -> func_b
    println!("\n2. Helper-mediated call chain:");
    println!("   Result: {}", helper::func_a(tracer));
}
