//! In-memory stand-ins for the rule store and the analysis service.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use legalbrain_core::models::catalog::{RuleTypeCatalog, RuleTypeOption, SeverityOption};
use legalbrain_core::models::pack::PackFile;
use legalbrain_core::models::report::AnalysisReport;
use legalbrain_core::models::rule::{NewRule, Rule, RuleId, RuleKind};
use legalbrain_sync::error::RemoteError;
use legalbrain_sync::remote::{AnalysisService, BoxFuture, RuleStore};

pub fn standard_catalog() -> RuleTypeCatalog {
    RuleTypeCatalog {
        rule_types: vec![
            RuleTypeOption {
                value: "exclude_word".to_string(),
                label: "Exclude Word/Phrase".to_string(),
                description: "Never mention this word or phrase in the output".to_string(),
            },
            RuleTypeOption {
                value: "severity_override".to_string(),
                label: "Severity Override".to_string(),
                description: "Change the severity level for a specific topic".to_string(),
            },
            RuleTypeOption {
                value: "custom_instruction".to_string(),
                label: "Custom Instruction".to_string(),
                description: "Add a custom instruction for the AI to follow".to_string(),
            },
        ],
        severities: vec![
            SeverityOption {
                value: "red".to_string(),
                label: "Red (Deal-breaker)".to_string(),
            },
            SeverityOption {
                value: "amber".to_string(),
                label: "Amber (Caution)".to_string(),
            },
            SeverityOption {
                value: "green".to_string(),
                label: "Green (Standard)".to_string(),
            },
            SeverityOption {
                value: "ignore".to_string(),
                label: "Ignore (Don't report)".to_string(),
            },
        ],
    }
}

/// Delay key for `list_rules`.
pub const LIST_KEY: &str = "<list>";
/// Delay key for `fetch_catalog`.
pub const CATALOG_KEY: &str = "<catalog>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    List,
    Catalog,
    Create,
    Delete,
    Toggle,
}

#[derive(Default)]
struct StoreState {
    rules: Vec<Rule>,
    catalog: RuleTypeCatalog,
    next_id: u32,
    failures: HashMap<Op, RemoteError>,
    /// Latency keyed by rule value (create), rule id (delete/toggle), or
    /// [`LIST_KEY`] / [`CATALOG_KEY`] for the two load fetches.
    delays: HashMap<String, Duration>,
    /// Extra instruction the store writes on toggle, to mimic side effects.
    toggle_note: Option<String>,
    calls: Vec<Op>,
}

/// Rule store backed by a `Vec`, assigning ids `r1`, `r2`, ... in the order
/// creations complete.
#[derive(Default)]
pub struct FakeRuleStore {
    state: Mutex<StoreState>,
}

impl FakeRuleStore {
    pub fn new() -> Self {
        let store = Self::default();
        store.state.lock().unwrap().catalog = standard_catalog();
        store
    }

    pub fn with_catalog(self, catalog: RuleTypeCatalog) -> Self {
        self.state.lock().unwrap().catalog = catalog;
        self
    }

    pub fn with_rules(self, rules: Vec<Rule>) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.next_id = rules.len() as u32;
            state.rules = rules;
        }
        self
    }

    pub fn fail(&self, op: Op, err: RemoteError) {
        self.state.lock().unwrap().failures.insert(op, err);
    }

    pub fn recover(&self, op: Op) {
        self.state.lock().unwrap().failures.remove(&op);
    }

    pub fn delay(&self, key: &str, delay: Duration) {
        self.state
            .lock()
            .unwrap()
            .delays
            .insert(key.to_string(), delay);
    }

    pub fn annotate_toggles(&self, note: &str) {
        self.state.lock().unwrap().toggle_note = Some(note.to_string());
    }

    pub fn stored_rules(&self) -> Vec<Rule> {
        self.state.lock().unwrap().rules.clone()
    }

    pub fn calls(&self) -> Vec<Op> {
        self.state.lock().unwrap().calls.clone()
    }

    fn delay_for(&self, key: &str) -> Option<Duration> {
        self.state.lock().unwrap().delays.get(key).copied()
    }

    /// Record the call and return the injected failure, if any.
    fn enter(&self, op: Op) -> Result<(), RemoteError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(op);
        match state.failures.get(&op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

async fn pause(delay: Option<Duration>) {
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
}

impl RuleStore for FakeRuleStore {
    fn list_rules(&self) -> BoxFuture<'_, Result<Vec<Rule>, RemoteError>> {
        Box::pin(async move {
            pause(self.delay_for(LIST_KEY)).await;
            self.enter(Op::List)?;
            Ok(self.stored_rules())
        })
    }

    fn fetch_catalog(&self) -> BoxFuture<'_, Result<RuleTypeCatalog, RemoteError>> {
        Box::pin(async move {
            pause(self.delay_for(CATALOG_KEY)).await;
            self.enter(Op::Catalog)?;
            Ok(self.state.lock().unwrap().catalog.clone())
        })
    }

    fn create_rule(&self, rule: NewRule) -> BoxFuture<'_, Result<Rule, RemoteError>> {
        Box::pin(async move {
            pause(self.delay_for(rule.value())).await;
            self.enter(Op::Create)?;

            let mut state = self.state.lock().unwrap();
            state.next_id += 1;
            let created = rule.confirm(RuleId::new(format!("r{}", state.next_id)));
            state.rules.push(created.clone());
            Ok(created)
        })
    }

    fn delete_rule(&self, id: RuleId) -> BoxFuture<'_, Result<(), RemoteError>> {
        Box::pin(async move {
            pause(self.delay_for(id.as_str())).await;
            self.enter(Op::Delete)?;

            let mut state = self.state.lock().unwrap();
            let before = state.rules.len();
            state.rules.retain(|r| r.id != id);
            if state.rules.len() == before {
                return Err(RemoteError::with_status(404, "Rule not found"));
            }
            Ok(())
        })
    }

    fn toggle_rule(&self, id: RuleId) -> BoxFuture<'_, Result<Rule, RemoteError>> {
        Box::pin(async move {
            pause(self.delay_for(id.as_str())).await;
            self.enter(Op::Toggle)?;

            let mut state = self.state.lock().unwrap();
            let note = state.toggle_note.clone();
            let rule = state
                .rules
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| RemoteError::with_status(404, "Rule not found"))?;
            rule.enabled = !rule.enabled;
            if let Some(note) = note {
                match &mut rule.kind {
                    RuleKind::ExcludeWord { instruction }
                    | RuleKind::SeverityOverride { instruction, .. }
                    | RuleKind::CustomInstruction { instruction }
                    | RuleKind::Unrecognized { instruction, .. } => *instruction = Some(note),
                }
            }
            Ok(rule.clone())
        })
    }
}

/// Analysis service returning a canned result after an optional delay.
pub struct FakeAnalysisService {
    result: Mutex<Result<AnalysisReport, RemoteError>>,
    delay: Option<Duration>,
    submitted: Mutex<Vec<String>>,
}

impl FakeAnalysisService {
    pub fn succeeding(report_markdown: &str) -> Self {
        Self {
            result: Mutex::new(Ok(report(report_markdown))),
            delay: None,
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: RemoteError) -> Self {
        Self {
            result: Mutex::new(Err(err)),
            delay: None,
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn respond_with(&self, result: Result<AnalysisReport, RemoteError>) {
        *self.result.lock().unwrap() = result;
    }

    pub fn submitted(&self) -> Vec<String> {
        self.submitted.lock().unwrap().clone()
    }
}

impl AnalysisService for FakeAnalysisService {
    fn submit_pack(&self, file: PackFile) -> BoxFuture<'_, Result<AnalysisReport, RemoteError>> {
        Box::pin(async move {
            self.submitted
                .lock()
                .unwrap()
                .push(file.file_name().to_string());
            pause(self.delay).await;
            self.result.lock().unwrap().clone()
        })
    }
}

pub fn report(markdown: &str) -> AnalysisReport {
    AnalysisReport {
        report_markdown: markdown.to_string(),
        flags: Vec::new(),
        confidence: Some(0.8),
    }
}

pub fn pdf(name: &str) -> PackFile {
    PackFile::new(name, b"%PDF-1.7".to_vec()).unwrap()
}
