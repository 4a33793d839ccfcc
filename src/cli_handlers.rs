use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::graph::{Algorithm, Graph, Report, StepView};
use crate::playback::Playback;
use crate::presets::PRESETS;
use serde::Serialize;
use serde_json::json;
use tracing::info;

/// Condensed result of one engine run, as printed by `sort` and `compare`.
#[derive(Debug, Serialize)]
pub struct SortSummary<'a> {
    pub algorithm: Algorithm,
    pub order: &'a [String],
    pub has_cycle: bool,
    /// Vertices missing from `order`, in identifier order
    pub unresolved: Vec<&'a String>,
    pub vertex_count: usize,
    pub edge_count: usize,
    pub steps: usize,
}

impl<'a> SortSummary<'a> {
    pub fn new(graph: &'a Graph<String>, report: &'a Report<String>) -> Self {
        let order = report.order();
        let unresolved = graph
            .vertices_sorted()
            .filter(|v| !order.contains(v))
            .collect();

        Self {
            algorithm: report.algorithm(),
            order,
            has_cycle: report.has_cycle(),
            unresolved,
            vertex_count: graph.vertex_count(),
            edge_count: graph.edge_count(),
            steps: report.trace_len(),
        }
    }
}

fn run(config: &Config) -> Result<(Graph<String>, Report<String>)> {
    let graph = config.load_graph()?;
    let report = config.algorithm.run(&graph);
    info!(
        algorithm = %config.algorithm,
        vertices = graph.vertex_count(),
        has_cycle = report.has_cycle(),
        "ordering finished"
    );
    Ok((graph, report))
}

/// Handle the sort command. Returns whether a cycle was found.
pub fn handle_sort(config: &Config) -> Result<bool> {
    let (graph, report) = run(config)?;
    let summary = SortSummary::new(&graph, &report);

    match config.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Text => print_summary(&summary),
    }

    Ok(summary.has_cycle)
}

fn print_summary(summary: &SortSummary<'_>) {
    if !summary.has_cycle {
        if summary.order.is_empty() {
            println!("Graph is empty; nothing to order.");
        } else {
            println!(
                "Topological order ({}): {}",
                summary.algorithm,
                summary.order.join(" -> ")
            );
        }
        return;
    }

    println!(
        "Cycle detected ({}): no topological order exists.",
        summary.algorithm
    );
    if !summary.order.is_empty() {
        println!("  Ordered before progress stopped: {}", summary.order.join(", "));
    }
    let unresolved = summary
        .unresolved
        .iter()
        .map(|v| v.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    println!("  Unresolved:   {unresolved}");
}

/// Handle the trace command
pub fn handle_trace(config: &Config) -> Result<()> {
    let (_graph, report) = run(config)?;

    match config.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            for (index, step) in report.steps().iter().enumerate() {
                println!("{}", format_step_line(index, step));
            }
            println!();
            println!("{} steps, cycle: {}", report.trace_len(), yes_no(report.has_cycle()));
        }
    }

    Ok(())
}

/// Handle the step command
pub fn handle_step(config: &Config, index: usize) -> Result<()> {
    let (_graph, report) = run(config)?;

    let record = match &report {
        Report::Kahn(outcome) => serde_json::to_value(Playback::new(&outcome.trace).seek(index)?)?,
        Report::Dfs(outcome) => serde_json::to_value(Playback::new(&outcome.trace).seek(index)?)?,
    };

    match config.output {
        OutputFormat::Json => {
            let value = json!({
                "algorithm": report.algorithm(),
                "index": index,
                "total": report.trace_len(),
                "record": record,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => {
            let steps = report.steps();
            let mut playback = Playback::new(&steps);
            let step = playback.seek(index)?;
            println!("Step {} of {}", index + 1, playback.len());
            println!("{}", format_step_line(index, step));
            println!("  Order so far: [{}]", step.order.join(", "));
            if let Some(next) = playback.next() {
                println!("  Next:         [{}] {}", next.kind, next.message);
            }
        }
    }

    Ok(())
}

/// Handle the compare command
pub fn handle_compare(config: &Config) -> Result<()> {
    let graph = config.load_graph()?;
    let kahn = Algorithm::Kahn.run(&graph);
    let dfs = Algorithm::Dfs.run(&graph);
    let summaries = [SortSummary::new(&graph, &kahn), SortSummary::new(&graph, &dfs)];

    match config.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
        OutputFormat::Text => {
            for summary in &summaries {
                let result = if summary.has_cycle {
                    "cycle".to_string()
                } else {
                    summary.order.join(" -> ")
                };
                println!(
                    "{:<5} {result}  ({} steps)",
                    summary.algorithm.as_str(),
                    summary.steps
                );
            }
        }
    }

    Ok(())
}

/// Handle the presets command
pub fn handle_presets() -> Result<()> {
    let width = PRESETS.iter().map(|p| p.name.len()).max().unwrap_or(0);
    for preset in PRESETS {
        println!("{:<width$}  {}", preset.name, preset.description);
    }
    Ok(())
}

fn format_step_line(index: usize, step: &StepView<'_, String>) -> String {
    format!("{index:>4}. [{}] {}", step.kind, step.message)
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
