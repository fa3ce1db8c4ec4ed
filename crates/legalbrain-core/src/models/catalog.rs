use std::collections::HashSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTypeOption {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityOption {
    pub value: String,
    pub label: String,
}

/// Reference data for the rule form: the available rule types and
/// severities, with human-readable labels. Read-only once fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTypeCatalog {
    #[serde(default)]
    pub rule_types: Vec<RuleTypeOption>,
    #[serde(default)]
    pub severities: Vec<SeverityOption>,
}

impl RuleTypeCatalog {
    pub fn is_empty(&self) -> bool {
        self.rule_types.is_empty() && self.severities.is_empty()
    }

    /// Label for a rule type, or the raw value when the catalog does not list it.
    pub fn rule_type_label<'a>(&'a self, value: &'a str) -> &'a str {
        self.rule_types
            .iter()
            .find(|t| t.value == value)
            .map(|t| t.label.as_str())
            .unwrap_or(value)
    }

    pub fn description(&self, value: &str) -> Option<&str> {
        self.rule_types
            .iter()
            .find(|t| t.value == value)
            .map(|t| t.description.as_str())
    }

    /// Label for a severity, or the raw value when the catalog does not list it.
    pub fn severity_label<'a>(&'a self, value: &'a str) -> &'a str {
        self.severities
            .iter()
            .find(|s| s.value == value)
            .map(|s| s.label.as_str())
            .unwrap_or(value)
    }

    /// Drop entries whose `value` repeats an earlier one (first wins).
    /// Returns the cleaned catalog and how many entries were dropped.
    pub fn dedup(self) -> (Self, usize) {
        let before = self.rule_types.len() + self.severities.len();

        let mut seen = HashSet::new();
        let rule_types: Vec<RuleTypeOption> = self
            .rule_types
            .into_iter()
            .filter(|t| seen.insert(t.value.clone()))
            .collect();

        let mut seen = HashSet::new();
        let severities: Vec<SeverityOption> = self
            .severities
            .into_iter()
            .filter(|s| seen.insert(s.value.clone()))
            .collect();

        let dropped = before - rule_types.len() - severities.len();
        (
            Self {
                rule_types,
                severities,
            },
            dropped,
        )
    }
}
