use std::future::Future;
use std::pin::Pin;

use legalbrain_core::models::catalog::RuleTypeCatalog;
use legalbrain_core::models::pack::PackFile;
use legalbrain_core::models::report::AnalysisReport;
use legalbrain_core::models::rule::{NewRule, Rule, RuleId};

use crate::error::RemoteError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The remote rule collection.
///
/// Arguments are taken by value so a returned future only borrows the
/// store itself. Methods return boxed futures for dyn compatibility.
pub trait RuleStore: Send + Sync {
    /// `GET rules-collection`: every rule, in store order.
    fn list_rules(&self) -> BoxFuture<'_, Result<Vec<Rule>, RemoteError>>;

    /// `GET rule-type-catalog`.
    fn fetch_catalog(&self) -> BoxFuture<'_, Result<RuleTypeCatalog, RemoteError>>;

    /// `POST rules-collection`. Returns the rule with its assigned id.
    fn create_rule(&self, rule: NewRule) -> BoxFuture<'_, Result<Rule, RemoteError>>;

    /// `DELETE rules-collection/{id}`. An unknown id is an error.
    fn delete_rule(&self, id: RuleId) -> BoxFuture<'_, Result<(), RemoteError>>;

    /// `POST rules-collection/{id}/toggle`. Returns the updated rule.
    fn toggle_rule(&self, id: RuleId) -> BoxFuture<'_, Result<Rule, RemoteError>>;
}

/// The remote legal pack analysis endpoint.
pub trait AnalysisService: Send + Sync {
    /// `POST analysis-submission` with the pack as multipart field `file`.
    fn submit_pack(&self, file: PackFile) -> BoxFuture<'_, Result<AnalysisReport, RemoteError>>;
}
