use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Opaque rule identifier. Only ever assigned by the rule store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(String);

impl RuleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RuleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RuleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    /// Never mention this word or phrase in the report.
    ExcludeWord,
    /// Report a topic at a fixed severity.
    SeverityOverride,
    /// Free-form instruction for the analysis.
    CustomInstruction,
}

impl RuleType {
    pub const ALL: [RuleType; 3] = [
        RuleType::ExcludeWord,
        RuleType::SeverityOverride,
        RuleType::CustomInstruction,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RuleType::ExcludeWord => "exclude_word",
            RuleType::SeverityOverride => "severity_override",
            RuleType::CustomInstruction => "custom_instruction",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == raw)
    }

    pub fn accepts_severity(self) -> bool {
        self == RuleType::SeverityOverride
    }

    pub fn accepts_instruction(self) -> bool {
        matches!(
            self,
            RuleType::SeverityOverride | RuleType::CustomInstruction
        )
    }

    /// Form label for the `value` field.
    pub fn value_label(self) -> &'static str {
        match self {
            RuleType::ExcludeWord => "Word/Phrase to Exclude",
            RuleType::SeverityOverride => "Topic/Issue",
            RuleType::CustomInstruction => "Instruction",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            RuleType::ExcludeWord => "e.g., restrictive covenant",
            RuleType::SeverityOverride => "e.g., coal mining report issues",
            RuleType::CustomInstruction => "e.g., Always highlight service charge amounts",
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Red,
    Amber,
    Green,
    Ignore,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Red => "red",
            Severity::Amber => "amber",
            Severity::Green => "green",
            Severity::Ignore => "ignore",
        }
    }
}

/// The type-dependent part of a rule. Each variant carries exactly the
/// fields that are legal for its rule type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    /// The add-rule form never sets notes here, but the store keeps any it
    /// is sent, so they are carried through.
    ExcludeWord {
        instruction: Option<String>,
    },
    SeverityOverride {
        severity: Severity,
        instruction: Option<String>,
    },
    CustomInstruction {
        instruction: Option<String>,
    },
    /// A rule type this build does not know (e.g. one retired from the
    /// catalog). Kept verbatim so the rule can still be listed.
    Unrecognized {
        rule_type: String,
        instruction: Option<String>,
    },
}

impl RuleKind {
    pub fn rule_type(&self) -> Option<RuleType> {
        match self {
            RuleKind::ExcludeWord { .. } => Some(RuleType::ExcludeWord),
            RuleKind::SeverityOverride { .. } => Some(RuleType::SeverityOverride),
            RuleKind::CustomInstruction { .. } => Some(RuleType::CustomInstruction),
            RuleKind::Unrecognized { .. } => None,
        }
    }

    /// The wire value of the rule type, including unknown ones.
    pub fn raw_type(&self) -> &str {
        match self {
            RuleKind::Unrecognized { rule_type, .. } => rule_type,
            known => known.rule_type().map(RuleType::as_str).unwrap_or_default(),
        }
    }

    pub fn severity(&self) -> Option<Severity> {
        match self {
            RuleKind::SeverityOverride { severity, .. } => Some(*severity),
            _ => None,
        }
    }

    pub fn instruction(&self) -> Option<&str> {
        match self {
            RuleKind::ExcludeWord { instruction }
            | RuleKind::SeverityOverride { instruction, .. }
            | RuleKind::CustomInstruction { instruction }
            | RuleKind::Unrecognized { instruction, .. } => instruction.as_deref(),
        }
    }
}

/// A rule confirmed by the rule store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RuleRecord", into = "RuleRecord")]
pub struct Rule {
    pub id: RuleId,
    pub value: String,
    pub kind: RuleKind,
    pub enabled: bool,
}

impl Rule {
    pub fn severity(&self) -> Option<Severity> {
        self.kind.severity()
    }

    pub fn instruction(&self) -> Option<&str> {
        self.kind.instruction()
    }
}

/// Flat wire representation shared by the rules endpoints:
/// `{id, rule_type, value, severity?, instruction?, enabled}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub rule_type: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl RuleRecord {
    /// Build the tagged kind. A severity on anything but an override is dropped.
    fn kind(&self) -> Result<RuleKind, CoreError> {
        let instruction = self.instruction.clone();
        let kind = match RuleType::parse(&self.rule_type) {
            Some(RuleType::ExcludeWord) => RuleKind::ExcludeWord { instruction },
            Some(RuleType::SeverityOverride) => RuleKind::SeverityOverride {
                severity: self.severity.ok_or(CoreError::MissingSeverity)?,
                instruction,
            },
            Some(RuleType::CustomInstruction) => RuleKind::CustomInstruction { instruction },
            None => RuleKind::Unrecognized {
                rule_type: self.rule_type.clone(),
                instruction,
            },
        };
        Ok(kind)
    }

    fn from_parts(id: Option<String>, value: String, kind: RuleKind, enabled: bool) -> Self {
        Self {
            id,
            rule_type: kind.raw_type().to_string(),
            severity: kind.severity(),
            instruction: kind.instruction().map(str::to_string),
            value,
            enabled,
        }
    }
}

impl TryFrom<RuleRecord> for Rule {
    type Error = CoreError;

    fn try_from(record: RuleRecord) -> Result<Self, Self::Error> {
        let kind = record.kind()?;
        let id = record
            .id
            .ok_or_else(|| CoreError::MissingField("id".to_string()))?;
        Ok(Rule {
            id: RuleId(id),
            value: record.value,
            kind,
            enabled: record.enabled,
        })
    }
}

impl From<Rule> for RuleRecord {
    fn from(rule: Rule) -> Self {
        RuleRecord::from_parts(Some(rule.id.0), rule.value, rule.kind, rule.enabled)
    }
}

/// A validated rule that has not been confirmed by the store yet.
///
/// Only [`RuleDraft::validate`] builds one, so a `NewRule` always has a
/// trimmed non-empty value and never an unknown rule type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "RuleRecord")]
pub struct NewRule {
    value: String,
    kind: RuleKind,
    enabled: bool,
}

impl NewRule {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Attach the identity the store assigned.
    pub fn confirm(self, id: RuleId) -> Rule {
        Rule {
            id,
            value: self.value,
            kind: self.kind,
            enabled: self.enabled,
        }
    }
}

impl From<NewRule> for RuleRecord {
    fn from(rule: NewRule) -> Self {
        RuleRecord::from_parts(None, rule.value, rule.kind, rule.enabled)
    }
}

/// A candidate rule as entered in the add-rule form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDraft {
    pub rule_type: RuleType,
    pub value: String,
    #[serde(default)]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub instruction: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl RuleDraft {
    pub fn new(rule_type: RuleType, value: impl Into<String>) -> Self {
        Self {
            rule_type,
            value: value.into(),
            severity: None,
            instruction: None,
            enabled: true,
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = Some(instruction.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Check the draft and normalise it into a [`NewRule`].
    ///
    /// The value and instruction are trimmed; a blank instruction is omitted.
    /// Fields that are not legal for the rule type (a severity on anything
    /// other than an override, notes on an excluded word) are left out rather
    /// than rejected, matching what the form offers for each type.
    pub fn validate(&self) -> Result<NewRule, CoreError> {
        let value = self.value.trim();
        if value.is_empty() {
            return Err(CoreError::EmptyValue);
        }

        let instruction = self
            .instruction
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let kind = match self.rule_type {
            RuleType::ExcludeWord => RuleKind::ExcludeWord { instruction: None },
            RuleType::SeverityOverride => RuleKind::SeverityOverride {
                severity: self.severity.ok_or(CoreError::MissingSeverity)?,
                instruction,
            },
            RuleType::CustomInstruction => RuleKind::CustomInstruction { instruction },
        };

        Ok(NewRule {
            value: value.to_string(),
            kind,
            enabled: self.enabled,
        })
    }
}
