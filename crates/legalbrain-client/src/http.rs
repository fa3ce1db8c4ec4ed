use legalbrain_core::models::catalog::RuleTypeCatalog;
use legalbrain_core::models::pack::PackFile;
use legalbrain_core::models::report::AnalysisReport;
use legalbrain_core::models::rule::{NewRule, Rule, RuleId};
use legalbrain_sync::error::{GENERIC_SUBMISSION_FAILURE, RemoteError};
use legalbrain_sync::remote::{AnalysisService, BoxFuture, RuleStore};
use reqwest::multipart::{Form, Part};
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ClientError, message_from_body};
use crate::settings::ClientSettings;

/// reqwest-backed client for the rules API and the analysis endpoint.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    /// Rules collection URL, always with a trailing slash.
    rules_url: Url,
    analyze_url: Url,
}

impl HttpClient {
    /// Build a client with its own connection pool.
    pub fn new(settings: &ClientSettings) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        Self::with_client(builder.build()?, settings)
    }

    /// Build a client on top of an existing reqwest client.
    pub fn with_client(http: reqwest::Client, settings: &ClientSettings) -> Result<Self, ClientError> {
        let base = settings.base_url.trim_end_matches('/');
        let rules_url = parse_url(&format!(
            "{base}/{}/",
            settings.rules_path.trim_matches('/')
        ))?;
        let analyze_url = parse_url(&format!(
            "{base}/{}",
            settings.analyze_path.trim_start_matches('/')
        ))?;

        Ok(Self {
            http,
            rules_url,
            analyze_url,
        })
    }

    pub fn rules_url(&self) -> &Url {
        &self.rules_url
    }

    pub fn analyze_url(&self) -> &Url {
        &self.analyze_url
    }

    /// A URL below the rules collection. Segments are percent-encoded.
    fn rules_endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.rules_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.rules_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn list_rules(&self) -> Result<Vec<Rule>, ClientError> {
        let url = self.rules_url.clone();
        debug!(%url, "listing rules");
        let resp = self.http.get(url).send().await?;
        read_json(resp, "Failed to fetch rules").await
    }

    pub async fn fetch_catalog(&self) -> Result<RuleTypeCatalog, ClientError> {
        let url = self.rules_endpoint(&["types"])?;
        debug!(%url, "fetching rule type catalog");
        let resp = self.http.get(url).send().await?;
        read_json(resp, "Failed to fetch rule types").await
    }

    pub async fn create_rule(&self, rule: &NewRule) -> Result<Rule, ClientError> {
        let url = self.rules_url.clone();
        debug!(%url, rule_type = rule.kind().raw_type(), "creating rule");
        let resp = self.http.post(url).json(rule).send().await?;
        read_json(resp, "Failed to create rule").await
    }

    pub async fn delete_rule(&self, id: &RuleId) -> Result<(), ClientError> {
        let url = self.rules_endpoint(&[id.as_str()])?;
        debug!(%url, "deleting rule");
        let resp = self.http.delete(url).send().await?;
        ensure_success(resp, "Failed to delete rule").await?;
        Ok(())
    }

    pub async fn toggle_rule(&self, id: &RuleId) -> Result<Rule, ClientError> {
        let url = self.rules_endpoint(&[id.as_str(), "toggle"])?;
        debug!(%url, "toggling rule");
        let resp = self.http.post(url).send().await?;
        read_json(resp, "Failed to toggle rule").await
    }

    /// Upload a pack as multipart field `file` and wait for the report.
    pub async fn submit_pack(&self, file: PackFile) -> Result<AnalysisReport, ClientError> {
        let (file_name, content_type, bytes) = file.into_parts();
        debug!(url = %self.analyze_url, %file_name, bytes = bytes.len(), "uploading pack");

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(content_type)?;
        let form = Form::new().part("file", part);

        let resp = self
            .http
            .post(self.analyze_url.clone())
            .multipart(form)
            .send()
            .await?;
        read_json(resp, GENERIC_SUBMISSION_FAILURE).await
    }
}

fn parse_url(raw: &str) -> Result<Url, ClientError> {
    Url::parse(raw).map_err(|e| ClientError::InvalidUrl(format!("{raw}: {e}")))
}

/// Pass a success response through; turn anything else into
/// `ClientError::Status` carrying the body text.
async fn ensure_success(resp: Response, fallback: &str) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let message = message_from_body(&body, fallback);
    debug!(status = status.as_u16(), %message, "request rejected");
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

async fn read_json<T: DeserializeOwned>(resp: Response, fallback: &str) -> Result<T, ClientError> {
    let resp = ensure_success(resp, fallback).await?;
    let body = resp.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

impl RuleStore for HttpClient {
    fn list_rules(&self) -> BoxFuture<'_, Result<Vec<Rule>, RemoteError>> {
        Box::pin(async move { Ok(HttpClient::list_rules(self).await?) })
    }

    fn fetch_catalog(&self) -> BoxFuture<'_, Result<RuleTypeCatalog, RemoteError>> {
        Box::pin(async move { Ok(HttpClient::fetch_catalog(self).await?) })
    }

    fn create_rule(&self, rule: NewRule) -> BoxFuture<'_, Result<Rule, RemoteError>> {
        Box::pin(async move { Ok(HttpClient::create_rule(self, &rule).await?) })
    }

    fn delete_rule(&self, id: RuleId) -> BoxFuture<'_, Result<(), RemoteError>> {
        Box::pin(async move { Ok(HttpClient::delete_rule(self, &id).await?) })
    }

    fn toggle_rule(&self, id: RuleId) -> BoxFuture<'_, Result<Rule, RemoteError>> {
        Box::pin(async move { Ok(HttpClient::toggle_rule(self, &id).await?) })
    }
}

impl AnalysisService for HttpClient {
    fn submit_pack(&self, file: PackFile) -> BoxFuture<'_, Result<AnalysisReport, RemoteError>> {
        Box::pin(async move { Ok(HttpClient::submit_pack(self, file).await?) })
    }
}
