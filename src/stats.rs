//! # Statistics Module
//!
//! The per-run instrumentation record every strategy must produce (§4.2),
//! plus formatted reporting adapted from the teacher's `stats.rs` — same
//! `comfy-table` presentation, generalized from a 2-3 strategy comparison
//! to the five-strategy one this crate supports.

use std::fmt::{self, Display};

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table, modifiers, presets};

use crate::movedef::Move;

/// Instrumentation for a single `solve()` call.
///
/// `search_time` and `memory_usage` come from two *separate* passes over
/// the same search body (see `search::run_two_pass`) so that the memory
/// profiler never distorts the timing or node-count figures.
#[derive(Clone, Debug, Default)]
pub struct Stats {
    /// The move sequence found, or `None` if the search was exhausted or
    /// timed out.
    pub solution: Option<Vec<Move>>,
    /// Wall-clock search time in seconds, from the unprofiled run.
    pub search_time: f64,
    /// Peak resident memory observed during the profiled run, in
    /// kilobytes.
    pub memory_usage: f64,
    /// Frontier pops that were actually processed (not skipped as stale),
    /// from the unprofiled run.
    pub nodes_expanded: usize,
}

impl Stats {
    /// Number of moves in the solution, or `None` if there is no
    /// solution.
    pub fn solution_len(&self) -> Option<usize> {
        self.solution.as_ref().map(Vec::len)
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "solved={}, moves={}, nodes_expanded={}, time={:.4}s, memory={:.1}KB",
            self.solution.is_some(),
            self.solution_len().unwrap_or(0),
            self.nodes_expanded,
            self.search_time,
            self.memory_usage,
        )
    }
}

fn new_base_table() -> Table {
    let mut t = Table::new();
    t.load_preset(presets::UTF8_FULL_CONDENSED);
    t.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    t.set_content_arrangement(ContentArrangement::Dynamic);
    t
}

fn add_value_row(t: &mut Table, metric: &str, value: &dyn Display) {
    t.add_row([
        Cell::new(metric).add_attribute(Attribute::Bold),
        Cell::new(format!("{value}")).set_alignment(CellAlignment::Right),
    ]);
}

/// Prints a formatted table for a single strategy's run statistics.
pub fn print_run_stats(label: &str, stats: &Stats) {
    let mut table = new_base_table();
    table.set_header([format!("{label} metric"), "value".to_string()]);

    add_value_row(&mut table, "Solved", &stats.solution.is_some());
    add_value_row(&mut table, "Solution length (moves)", &stats.solution_len().unwrap_or(0));
    add_value_row(&mut table, "Nodes expanded", &stats.nodes_expanded);
    add_value_row(&mut table, "Search time (s)", &format!("{:.4}", stats.search_time));
    add_value_row(&mut table, "Peak memory (KB)", &format!("{:.1}", stats.memory_usage));

    println!("\n{table}");
}

/// Prints a side-by-side comparison table across every strategy that was
/// run, mirroring the teacher's `print_comparison_table` but generalized
/// from a fixed 2-3 strategy layout to an arbitrary list of
/// `(label, Stats)` pairs.
pub fn print_comparison_table(runs: &[(&str, Stats)]) {
    println!("\nStrategy comparison ({} strategies)\n", runs.len());

    let mut table = new_base_table();
    let mut header = vec![Cell::new("Metric").add_attribute(Attribute::Bold)];
    header.extend(runs.iter().map(|(label, _)| Cell::new(*label)));
    table.set_header(header);

    let rows: [(&str, fn(&Stats) -> String); 5] = [
        ("Solved", |s| s.solution.is_some().to_string()),
        ("Solution length (moves)", |s| {
            s.solution_len().unwrap_or(0).to_string()
        }),
        ("Nodes expanded", |s| s.nodes_expanded.to_string()),
        ("Search time (s)", |s| format!("{:.4}", s.search_time)),
        ("Peak memory (KB)", |s| format!("{:.1}", s.memory_usage)),
    ];

    for (label, accessor) in rows {
        let mut row = vec![Cell::new(label).add_attribute(Attribute::Bold)];
        row.extend(
            runs.iter()
                .map(|(_, stats)| Cell::new(accessor(stats)).set_alignment(CellAlignment::Right)),
        );
        table.add_row(row);
    }

    println!("{table}");
}
