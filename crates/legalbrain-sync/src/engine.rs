//! Rule synchronization engine.
//!
//! Every mutation is confirm-then-apply: a request goes to the rule store,
//! and only the store's answer is written into the local list. The write
//! happens in one place, [`RuleSync::settle`], which applies identity-keyed
//! upserts and removals. That makes each commit idempotent and lets
//! independent requests complete in any order.
//!
//! The `request_*` methods start the remote half and return a future that
//! does not borrow the engine, so a caller can keep several independent
//! requests in flight and settle each one as it arrives. The plain `create` / `delete` / `toggle`
//! methods do both halves in sequence.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use legalbrain_core::models::catalog::RuleTypeCatalog;
use legalbrain_core::models::rule::{Rule, RuleDraft, RuleId, RuleKind};
use tracing::{debug, info, warn};

use crate::error::{LoadError, MutationError};
use crate::remote::{BoxFuture, RuleStore};

/// A fact confirmed by the rule store, ready to be committed locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    Created(Rule),
    Deleted(RuleId),
    Toggled(Rule),
}

impl Confirmation {
    pub fn rule_id(&self) -> &RuleId {
        match self {
            Confirmation::Created(rule) | Confirmation::Toggled(rule) => &rule.id,
            Confirmation::Deleted(id) => id,
        }
    }
}

pub type PendingMutation = BoxFuture<'static, Result<Confirmation, MutationError>>;

/// Local mirror of the remote rule collection and its catalog.
pub struct RuleSync<S: ?Sized> {
    store: Arc<S>,
    rules: Vec<Rule>,
    catalog: RuleTypeCatalog,
    ready: bool,
    last_error: Option<String>,
}

impl<S: ?Sized> RuleSync<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            rules: Vec::new(),
            catalog: RuleTypeCatalog::default(),
            ready: false,
            last_error: None,
        }
    }

    /// Rules as of the last confirmed response, in append order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rule(&self, id: &RuleId) -> Option<&Rule> {
        self.rules.iter().find(|r| &r.id == id)
    }

    pub fn catalog(&self) -> &RuleTypeCatalog {
        &self.catalog
    }

    /// True once a load has installed both the rules and the catalog.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn enabled_count(&self) -> usize {
        self.rules.iter().filter(|r| r.enabled).count()
    }

    /// The most recent error, until a new attempt or a successful commit.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Commit the outcome of a request to local state.
    ///
    /// A failure leaves the rule list exactly as it was and becomes the
    /// displayed error.
    pub fn settle(
        &mut self,
        outcome: Result<Confirmation, MutationError>,
    ) -> Result<(), MutationError> {
        match outcome {
            Ok(confirmation) => {
                self.apply(confirmation);
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                warn!(
                    rule_id = ?err.rule_id().map(RuleId::as_str),
                    error = %err,
                    "rule mutation failed"
                );
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    fn apply(&mut self, confirmation: Confirmation) {
        match confirmation {
            Confirmation::Created(rule) => {
                info!(rule_id = %rule.id, rule_type = rule.kind.raw_type(), "rule created");
                match self.rules.iter_mut().find(|r| r.id == rule.id) {
                    Some(existing) => *existing = rule,
                    None => self.rules.push(rule),
                }
            }
            Confirmation::Deleted(id) => {
                info!(rule_id = %id, "rule deleted");
                self.rules.retain(|r| r.id != id);
            }
            Confirmation::Toggled(rule) => match self.rules.iter_mut().find(|r| r.id == rule.id) {
                Some(existing) => {
                    info!(rule_id = %rule.id, enabled = rule.enabled, "rule toggled");
                    *existing = rule;
                }
                // Deleted while the toggle was in flight.
                None => debug!(rule_id = %rule.id, "toggle confirmed for unlisted rule, ignoring"),
            },
        }
    }
}

impl<S: RuleStore + ?Sized + 'static> RuleSync<S> {
    /// Fetch the rules and the catalog together and install both.
    ///
    /// Both calls are issued at once and both must settle. If either fails
    /// nothing is installed and the previous state stays in place; when both
    /// fail, the error that arrived first is reported.
    pub async fn load(&mut self) -> Result<(), LoadError> {
        self.last_error = None;
        let store = Arc::clone(&self.store);

        // Completion sequence, to tell which fetch settled first.
        let settled = AtomicUsize::new(0);
        let ((rules_seq, rules), (catalog_seq, catalog)) = futures::future::join(
            async {
                let rules = store.list_rules().await;
                (settled.fetch_add(1, Ordering::Relaxed), rules)
            },
            async {
                let catalog = store.fetch_catalog().await;
                (settled.fetch_add(1, Ordering::Relaxed), catalog)
            },
        )
        .await;

        let fetched = match (rules, catalog) {
            (Ok(rules), Ok(catalog)) => Ok((rules, catalog)),
            (Err(rules_err), Err(catalog_err)) if catalog_seq < rules_seq => {
                debug!(error = %rules_err, "rules fetch also failed");
                Err(LoadError::Catalog(catalog_err))
            }
            (Err(rules_err), Err(catalog_err)) => {
                debug!(error = %catalog_err, "catalog fetch also failed");
                Err(LoadError::Rules(rules_err))
            }
            (Err(err), Ok(_)) => Err(LoadError::Rules(err)),
            (Ok(_), Err(err)) => Err(LoadError::Catalog(err)),
        };

        let (rules, catalog) = match fetched {
            Ok(fetched) => fetched,
            Err(err) => {
                warn!(error = %err, "failed to load rules");
                self.last_error = Some(err.to_string());
                return Err(err);
            }
        };

        let (catalog, dropped) = catalog.dedup();
        if dropped > 0 {
            warn!(dropped, "rule type catalog listed duplicate values");
        }
        for rule in &rules {
            if let RuleKind::Unrecognized { rule_type, .. } = &rule.kind {
                debug!(rule_id = %rule.id, rule_type = %rule_type, "rule uses a type this build does not know");
            }
        }

        self.rules = rules;
        self.catalog = catalog;
        self.ready = true;

        info!(
            count = self.rules.len(),
            enabled = self.enabled_count(),
            "rules loaded"
        );
        Ok(())
    }

    /// Validate a draft and ask the store to create it.
    ///
    /// Starting a request clears the displayed error. An invalid draft fails
    /// without any remote call.
    pub fn request_create(&mut self, draft: &RuleDraft) -> PendingMutation {
        self.last_error = None;
        let store = Arc::clone(&self.store);
        let validated = draft.validate();
        Box::pin(async move {
            let rule = validated?;
            let created = store
                .create_rule(rule)
                .await
                .map_err(MutationError::Create)?;
            Ok(Confirmation::Created(created))
        })
    }

    pub fn request_delete(&mut self, id: &RuleId) -> PendingMutation {
        self.last_error = None;
        let store = Arc::clone(&self.store);
        let id = id.clone();
        Box::pin(async move {
            match store.delete_rule(id.clone()).await {
                Ok(()) => Ok(Confirmation::Deleted(id)),
                Err(source) => Err(MutationError::Delete { id, source }),
            }
        })
    }

    pub fn request_toggle(&mut self, id: &RuleId) -> PendingMutation {
        self.last_error = None;
        let store = Arc::clone(&self.store);
        let id = id.clone();
        Box::pin(async move {
            match store.toggle_rule(id.clone()).await {
                Ok(rule) => Ok(Confirmation::Toggled(rule)),
                Err(source) => Err(MutationError::Toggle { id, source }),
            }
        })
    }

    /// Create a rule and append the confirmed rule to the list.
    pub async fn create(&mut self, draft: &RuleDraft) -> Result<(), MutationError> {
        let outcome = self.request_create(draft).await;
        self.settle(outcome)
    }

    /// Delete a rule, removing it locally once the store confirms.
    pub async fn delete(&mut self, id: &RuleId) -> Result<(), MutationError> {
        let outcome = self.request_delete(id).await;
        self.settle(outcome)
    }

    /// Flip a rule's `enabled` flag, replacing the local entry with the
    /// store's returned rule.
    pub async fn toggle(&mut self, id: &RuleId) -> Result<(), MutationError> {
        let outcome = self.request_toggle(id).await;
        self.settle(outcome)
    }
}
