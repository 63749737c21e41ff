use console::style;
use fixture_chain::CallGraph;
use std::backtrace::BacktraceStatus;

pub fn print_error(e: anyhow::Error) {
    for e in e.chain().rev() {
        eprintln!(
            "{}{} {}",
            style("error").red().bold(),
            style(":").white().bold(),
            e
        );
    }
    let bt = e.backtrace();
    if bt.status() == BacktraceStatus::Captured {
        eprintln!("error backtrace:");
        eprintln!("{bt}");
    }
}

/// Prints the expected call graph, as text or as JSON.
pub fn print_graph(graph: &CallGraph, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(graph)?);
    } else {
        println!("{:>12} max depth {}", style("Call graph").green().bold(), graph.max_depth);
        println!("{}", graph.render());
    }
    Ok(())
}
