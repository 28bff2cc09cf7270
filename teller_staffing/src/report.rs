//! Console rendering and file export of search results
//!
//! CSV holds one row per teller count for spreadsheets and pandas; JSON holds
//! the whole [`StaffingOutcome`], config and seed included, for reproducing a
//! run.

use crate::search::StaffingOutcome;
use crate::stats::SimulationResult;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

fn minutes(seconds: f64) -> f64 {
    seconds / 60.0
}

/// Banner printed before the per-count blocks
pub fn render_header(outcome: &StaffingOutcome) -> String {
    let config = &outcome.config;
    let mut out = String::new();
    let _ = writeln!(out, "=== BANK TELLER STAFFING SIMULATION ===");
    let _ = writeln!(
        out,
        "Peak window: {}s ({:.1} minutes)",
        config.window,
        minutes(config.window as f64)
    );
    let _ = writeln!(
        out,
        "Goal: nobody waits more than {}s ({:.1} minutes)",
        config.max_allowed_wait,
        minutes(config.max_allowed_wait as f64)
    );
    let _ = writeln!(
        out,
        "Arrivals: {} (seed {})",
        config.arrival_policy, outcome.seed
    );
    let _ = writeln!(out, "=======================================");
    out
}

/// Block describing one run
pub fn render_result(result: &SimulationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "SIMULATION WITH {} TELLER(S):", result.tellers);
    let _ = writeln!(out, "• Customers served: {}", result.customers_served);
    let _ = writeln!(
        out,
        "• Maximum wait: {} seconds ({:.1} minutes)",
        result.max_wait,
        minutes(result.max_wait as f64)
    );
    let _ = writeln!(
        out,
        "• Maximum service: {} seconds ({:.1} minutes)",
        result.max_service,
        minutes(result.max_service as f64)
    );
    let _ = writeln!(
        out,
        "• Mean time in bank: {:.1} seconds ({:.1} minutes)",
        result.mean_total,
        minutes(result.mean_total)
    );
    let _ = writeln!(
        out,
        "• Mean wait: {:.1} seconds ({:.1} minutes)",
        result.mean_wait,
        minutes(result.mean_wait)
    );
    let utilization: Vec<String> = result
        .utilization()
        .iter()
        .map(|u| format!("{:.1}%", u * 100.0))
        .collect();
    let _ = writeln!(out, "• Teller utilization: {}", utilization.join(" "));
    let _ = writeln!(
        out,
        "• Wait goal met? {}",
        if result.goal_met { "✓ YES" } else { "✗ NO" }
    );
    out
}

pub fn render_recommendation(recommended: Option<usize>) -> String {
    match recommended {
        Some(tellers) => format!(
            "*** RECOMMENDATION: {} teller(s) is enough to meet the goal ***",
            tellers
        ),
        None => "*** No teller count in range achieves the goal ***".to_string(),
    }
}

/// Full console report: header, one block per count, recommendation
pub fn render_outcome(outcome: &StaffingOutcome) -> String {
    let mut out = render_header(outcome);
    out.push('\n');
    for result in &outcome.results {
        out.push_str(&render_result(result));
        out.push_str("---------------------------------------\n\n");
    }
    out.push_str(&render_recommendation(outcome.recommended));
    out.push('\n');
    out
}

/// Write one CSV row per teller count
pub fn write_csv<P: AsRef<Path>>(
    path: P,
    results: &[SimulationResult],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "tellers",
        "customers_served",
        "max_wait",
        "max_service",
        "mean_total",
        "mean_wait",
        "goal_met",
        "mean_utilization",
    ])?;

    for result in results {
        wtr.write_record(&[
            result.tellers.to_string(),
            result.customers_served.to_string(),
            result.max_wait.to_string(),
            result.max_service.to_string(),
            result.mean_total.to_string(),
            result.mean_wait.to_string(),
            result.goal_met.to_string(),
            format!("{:.3}", result.mean_utilization()),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the whole outcome as pretty JSON
pub fn write_json<P: AsRef<Path>>(
    path: P,
    outcome: &StaffingOutcome,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(outcome)?;
    fs::write(path, json)?;
    Ok(())
}
