mod common;

use std::sync::Arc;

use legalbrain_core::models::rule::{Rule, RuleDraft, RuleType, Severity};
use legalbrain_sync::engine::RuleSync;
use legalbrain_sync::error::RemoteError;
use legalbrain_sync::view::{DashboardView, EMPTY_RULES_MESSAGE};

use common::{FakeRuleStore, Op};

#[tokio::test]
async fn empty_store_shows_empty_message() {
    let store = Arc::new(FakeRuleStore::new());
    let mut engine = RuleSync::new(store);
    engine.load().await.unwrap();

    let view = DashboardView::build(&engine);
    assert_eq!(view.heading, "Active Rules (0 enabled)");
    assert!(view.rows.is_empty());
    assert_eq!(view.empty_message, Some(EMPTY_RULES_MESSAGE));
    assert_eq!(EMPTY_RULES_MESSAGE, "No rules configured yet.");
}

#[tokio::test]
async fn rows_use_catalog_labels() {
    let store = Arc::new(FakeRuleStore::new());
    let mut engine = RuleSync::new(Arc::clone(&store));
    engine.load().await.unwrap();
    engine
        .create(&RuleDraft::new(RuleType::ExcludeWord, "restrictive covenant"))
        .await
        .unwrap();
    engine
        .create(
            &RuleDraft::new(RuleType::SeverityOverride, "coal mining report")
                .with_severity(Severity::Amber)
                .with_instruction("Don't flag as red, just amber"),
        )
        .await
        .unwrap();
    engine.toggle(&"r1".into()).await.unwrap();

    let view = DashboardView::build(&engine);
    assert_eq!(view.heading, "Active Rules (1 enabled)");
    assert_eq!(view.empty_message, None);

    let first = &view.rows[0];
    assert!(!first.enabled);
    assert_eq!(first.type_label, "Exclude Word/Phrase");
    assert_eq!(first.severity_label, None);
    assert_eq!(first.notes, "-");

    let second = &view.rows[1];
    assert_eq!(second.type_label, "Severity Override");
    assert_eq!(second.severity_label.as_deref(), Some("Amber (Caution)"));
    assert_eq!(second.notes, "Don't flag as red, just amber");
}

#[tokio::test]
async fn unknown_rule_type_displays_raw_value() {
    let legacy: Rule = serde_json::from_value(serde_json::json!({
        "id": "legacy-1",
        "rule_type": "retired_type",
        "value": "old rule",
        "enabled": true,
    }))
    .unwrap();
    let store = Arc::new(FakeRuleStore::new().with_rules(vec![legacy]));
    let mut engine = RuleSync::new(store);
    engine.load().await.unwrap();

    let view = DashboardView::build(&engine);
    assert_eq!(view.rows[0].type_label, "retired_type");
}

#[tokio::test]
async fn last_error_is_shown() {
    let store = Arc::new(FakeRuleStore::new());
    let mut engine = RuleSync::new(Arc::clone(&store));
    engine.load().await.unwrap();

    store.fail(Op::Create, RemoteError::new("Failed to create rule"));
    let _ = engine
        .create(&RuleDraft::new(RuleType::ExcludeWord, "x"))
        .await;

    let view = DashboardView::build(&engine);
    assert_eq!(view.error.as_deref(), Some("Failed to create rule"));
    assert_eq!(view.empty_message, Some(EMPTY_RULES_MESSAGE));
}
