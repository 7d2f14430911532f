//! Results reporting and formatting.

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};

use crate::check::CheckResults;

/// Formats check results for output.
pub struct ResultsReport;

impl ResultsReport {
    /// Format results as a console table.
    pub fn format_table(results: &CheckResults) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_header(vec![format!("Regrid Check: {}", results.name)]);

        table.add_row(vec![
            "Swath:",
            &format!(
                "{} x {} ({} of {} samples valid)",
                results.profiles, results.levels, results.valid_samples, results.samples
            ),
        ]);
        table.add_row(vec![
            "Destination:",
            &format!("{} x {}", results.nx, results.nz),
        ]);
        table.add_row(vec![
            "Coverage:",
            &format!(
                "{:.1}% ({} cells)",
                results.coverage * 100.0,
                results.valid_cells
            ),
        ]);
        if let Some((min, max)) = results.value_range {
            table.add_row(vec!["Value range:", &format!("{:.3} .. {:.3}", min, max)]);
        }

        table.add_row(vec!["", ""]);
        table.add_row(vec![
            "Counts match:",
            if results.counts_match { "yes" } else { "NO" },
        ]);
        table.add_row(vec![
            "Max |diff|:",
            &format!("{:.3e} (tolerance {:.1e})", results.max_abs_diff, results.tolerance),
        ]);
        if let Some(m) = &results.first_mismatch {
            table.add_row(vec![
                "First mismatch:",
                &format!(
                    "cell ({}, {}): {} [{}] vs {} [{}]",
                    m.n, m.m, m.reference, m.reference_count, m.accelerated, m.accelerated_count
                ),
            ]);
        }

        table.add_row(vec!["", ""]);
        table.add_row(vec!["Time (ms)", "reference / accelerated"]);
        table.add_row(vec![
            "",
            &format!(
                "{:.2} / {:.2} ({:.1}x, {})",
                results.reference_ms,
                results.accelerated_ms,
                results.speedup(),
                results.accelerated_backend
            ),
        ]);
        table.add_row(vec![
            "Result:",
            if results.passed() { "PASS" } else { "FAIL" },
        ]);

        table.to_string()
    }

    /// Format results as JSON.
    pub fn format_json(results: &CheckResults) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(results)?)
    }
}
