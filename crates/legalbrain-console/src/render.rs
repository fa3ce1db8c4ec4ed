//! Plain-text rendering for the terminal.

use std::fmt::Write;

use legalbrain_sync::view::DashboardView;
use legalbrain_sync::workflow::SubmissionPhase;

/// Render the rule dashboard: heading, error banner, then one line per rule.
pub fn render_dashboard(view: &DashboardView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.heading);

    if let Some(error) = &view.error {
        let _ = writeln!(out, "error: {error}");
    }

    if let Some(message) = view.empty_message {
        let _ = writeln!(out, "{message}");
        return out;
    }

    for row in &view.rows {
        let marker = if row.enabled { "[x]" } else { "[ ]" };
        let severity = row.severity_label.as_deref().unwrap_or("-");
        let _ = writeln!(
            out,
            "{marker} {} | {} | {severity} | {}",
            row.type_label, row.value, row.notes
        );
    }
    out
}

/// Render the state of a pack submission. Idle with nothing to show renders
/// as an empty string.
pub fn render_submission(phase: &SubmissionPhase) -> String {
    match phase {
        SubmissionPhase::Idle { .. } => String::new(),
        SubmissionPhase::Submitting => "Analyzing...\n".to_string(),
        SubmissionPhase::Succeeded(report) => {
            let mut out = report.report_markdown.trim_end().to_string();
            out.push('\n');
            if let Some(confidence) = report.confidence {
                let _ = writeln!(out, "\nconfidence: {confidence:.2}");
            }
            out
        }
        SubmissionPhase::Failed(message) => format!("error: {message}\n"),
    }
}
