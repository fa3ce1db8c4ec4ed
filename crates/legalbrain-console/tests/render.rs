use legalbrain_console::render::{render_dashboard, render_submission};
use legalbrain_core::models::report::AnalysisReport;
use legalbrain_core::models::rule::RuleId;
use legalbrain_sync::view::{DashboardView, EMPTY_RULES_MESSAGE, RuleRow};
use legalbrain_sync::workflow::SubmissionPhase;

fn row(id: &str, enabled: bool, severity: Option<&str>, notes: &str) -> RuleRow {
    RuleRow {
        id: RuleId::from(id),
        enabled,
        type_label: "Severity Override".to_string(),
        value: "coal mining report".to_string(),
        severity_label: severity.map(str::to_string),
        notes: notes.to_string(),
    }
}

#[test]
fn empty_dashboard_shows_message() {
    let view = DashboardView {
        heading: "Active Rules (0 enabled)".to_string(),
        rows: Vec::new(),
        empty_message: Some(EMPTY_RULES_MESSAGE),
        error: None,
    };

    assert_eq!(
        render_dashboard(&view),
        "Active Rules (0 enabled)\nNo rules configured yet.\n"
    );
}

#[test]
fn rows_render_one_per_line() {
    let view = DashboardView {
        heading: "Active Rules (1 enabled)".to_string(),
        rows: vec![
            row("r1", true, Some("Amber (Caution)"), "only flag if within 1km"),
            row("r2", false, None, "-"),
        ],
        empty_message: None,
        error: Some("Rule not found".to_string()),
    };

    let rendered = render_dashboard(&view);
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Active Rules (1 enabled)",
            "error: Rule not found",
            "[x] Severity Override | coal mining report | Amber (Caution) | only flag if within 1km",
            "[ ] Severity Override | coal mining report | - | -",
        ]
    );
}

#[test]
fn submission_phases_render() {
    assert_eq!(render_submission(&SubmissionPhase::Idle { prior: None }), "");
    assert_eq!(
        render_submission(&SubmissionPhase::Failed("file too large".to_string())),
        "error: file too large\n"
    );

    let report = AnalysisReport {
        report_markdown: "# Report\n\nNo red flags.\n\n".to_string(),
        flags: Vec::new(),
        confidence: Some(0.9),
    };
    assert_eq!(
        render_submission(&SubmissionPhase::Succeeded(report)),
        "# Report\n\nNo red flags.\n\nconfidence: 0.90\n"
    );
}
