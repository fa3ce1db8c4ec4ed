//! Display-ready projection of the rule engine for the dashboard.

use legalbrain_core::models::rule::{Rule, RuleId};
use serde::Serialize;

use crate::engine::RuleSync;

pub const EMPTY_RULES_MESSAGE: &str = "No rules configured yet.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleRow {
    pub id: RuleId,
    pub enabled: bool,
    pub type_label: String,
    pub value: String,
    pub severity_label: Option<String>,
    /// The rule's instruction, or `-` when it has none.
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub heading: String,
    pub rows: Vec<RuleRow>,
    pub empty_message: Option<&'static str>,
    pub error: Option<String>,
}

impl DashboardView {
    pub fn build<S: ?Sized>(engine: &RuleSync<S>) -> Self {
        let catalog = engine.catalog();
        let rows: Vec<RuleRow> = engine
            .rules()
            .iter()
            .map(|rule: &Rule| RuleRow {
                id: rule.id.clone(),
                enabled: rule.enabled,
                type_label: catalog.rule_type_label(rule.kind.raw_type()).to_string(),
                value: rule.value.clone(),
                severity_label: rule
                    .severity()
                    .map(|s| catalog.severity_label(s.as_str()).to_string()),
                notes: rule.instruction().unwrap_or("-").to_string(),
            })
            .collect();

        Self {
            heading: format!("Active Rules ({} enabled)", engine.enabled_count()),
            empty_message: rows.is_empty().then_some(EMPTY_RULES_MESSAGE),
            rows,
            error: engine.last_error().map(str::to_string),
        }
    }
}
