//! Plain-text rendering of reports.
//!
//! Tree output uses an indented ASCII layout: each record gets a
//! `+-- State at depth d` header under a prefix built from its ancestors'
//! `last_sibling` flags (`|   ` while siblings remain, four spaces after
//! the last one), followed by the state's multi-line rendering indented
//! under that prefix, and a per-depth summary at the end.
//!
//! Renderers take already-computed reports; nothing here runs a search.

use std::fmt::{Display, Write};

use statespace_search::report::{SearchOutcomeV1, TreeReportV1};

const RULE: &str = "========================================";

/// Render a tree report using each state's `Display`.
#[must_use]
pub fn render_tree_text<S: Display>(report: &TreeReportV1<S>) -> String {
    render_tree_text_with(report, ToString::to_string)
}

/// Render a tree report with a caller-supplied state formatter (for
/// example `NQueensWorld::render_board`). Multi-line renderings keep the
/// node's prefix on every line.
#[must_use]
pub fn render_tree_text_with<S>(
    report: &TreeReportV1<S>,
    format_state: impl Fn(&S) -> String,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Generating State Space Tree...");
    let _ = writeln!(out, "{RULE}");

    // Records are in visitation order, so a parent's prefix is always known
    // before its children are rendered.
    let mut prefixes: Vec<String> = Vec::with_capacity(report.records.len());
    for record in &report.records {
        let prefix = match record.parent_id {
            None => String::new(),
            Some(parent) => {
                let parent_prefix = usize::try_from(parent)
                    .ok()
                    .and_then(|i| prefixes.get(i))
                    .map_or("", String::as_str);
                let branch = if record.last_sibling { "    " } else { "|   " };
                format!("{parent_prefix}{branch}")
            }
        };

        let _ = writeln!(out);
        if record.parent_id.is_none() {
            let _ = writeln!(out, "Root State (Depth {}):", record.depth);
        } else {
            let _ = writeln!(out, "{prefix}+-- State at depth {}", record.depth);
        }
        let indent = format!("{prefix}    ");
        for line in format_state(&record.state).lines() {
            let _ = writeln!(out, "{indent}{line}");
        }

        prefixes.push(prefix);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Tree Generation Summary");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Total nodes generated: {}", report.total_count());
    for (depth, count) in report.depth_counts.iter().enumerate() {
        if *count > 0 {
            let _ = writeln!(out, "Nodes at depth {depth}: {count}");
        }
    }
    out
}

/// Numbered list of every solution in the report, in discovery order.
#[must_use]
pub fn render_solutions_text<S>(
    report: &TreeReportV1<S>,
    format_state: impl Fn(&S) -> String,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Solutions Found");
    let _ = writeln!(out, "{RULE}");
    let solutions = report.solution_states();
    if solutions.is_empty() {
        let _ = writeln!(out, "No solution found.");
    }
    for (i, state) in solutions.into_iter().enumerate() {
        let _ = writeln!(out, "Solution {}:", i + 1);
        for line in format_state(state).lines() {
            let _ = writeln!(out, "    {line}");
        }
    }
    out
}

/// A solution path, one step per line, with its total cost.
#[must_use]
pub fn render_path_text<S: Display>(states: &[S], total_cost: i64) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Solution Path");
    let _ = writeln!(out, "{RULE}");
    for (step, state) in states.iter().enumerate() {
        write_step(&mut out, step, &state.to_string());
    }
    let _ = writeln!(out, "Total cost: {total_cost}");
    out
}

/// The outcome's solution path, or `No solution found.` when the search
/// ended without reaching a goal. Multi-line states start on the line after
/// their step number.
#[must_use]
pub fn render_outcome_text<S>(
    outcome: &SearchOutcomeV1<S>,
    format_state: impl Fn(&S) -> String,
) -> String {
    let Some(total_cost) = outcome.total_cost() else {
        return format!("Solution Path\n{RULE}\nNo solution found.\n");
    };
    let mut out = String::new();
    let _ = writeln!(out, "Solution Path");
    let _ = writeln!(out, "{RULE}");
    for (step, state) in outcome.path_states().into_iter().enumerate() {
        write_step(&mut out, step, &format_state(state));
    }
    let _ = writeln!(out, "Total cost: {total_cost}");
    out
}

fn write_step(out: &mut String, step: usize, rendered: &str) {
    if rendered.contains('\n') {
        let _ = writeln!(out, "Step {step}:");
        for line in rendered.lines() {
            let _ = writeln!(out, "    {line}");
        }
    } else {
        let _ = writeln!(out, "Step {step}: {rendered}");
    }
}
