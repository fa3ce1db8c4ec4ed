//! Upload/analysis workflow.
//!
//! One submission slot: `Idle -> Submitting -> Succeeded | Failed`.
//! [`UploadWorkflow::begin_submit`] is the only way into `Submitting`, and it
//! refuses while a submission is in flight or when no file is selected.
//! There is no cancellation and no timeout at this layer.

use std::sync::Arc;

use legalbrain_core::models::pack::PackFile;
use legalbrain_core::models::report::AnalysisReport;
use tracing::{debug, info, warn};

use crate::error::SubmissionError;
use crate::remote::AnalysisService;

/// The result of a finished submission, kept on display while idle.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Report(AnalysisReport),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionPhase {
    /// Waiting for a submit. `prior` is the outcome of the previous run, if
    /// it is still being shown.
    Idle { prior: Option<Outcome> },
    Submitting,
    Succeeded(AnalysisReport),
    Failed(String),
}

impl SubmissionPhase {
    fn outcome(&self) -> Option<Outcome> {
        match self {
            SubmissionPhase::Idle { prior } => prior.clone(),
            SubmissionPhase::Submitting => None,
            SubmissionPhase::Succeeded(report) => Some(Outcome::Report(report.clone())),
            SubmissionPhase::Failed(message) => Some(Outcome::Error(message.clone())),
        }
    }
}

/// An admitted submission. Running it does not borrow the workflow; hand
/// the result back through [`UploadWorkflow::finish`].
pub struct PendingSubmission<A: ?Sized> {
    service: Arc<A>,
    file: PackFile,
}

impl<A: AnalysisService + ?Sized> PendingSubmission<A> {
    pub fn file(&self) -> &PackFile {
        &self.file
    }

    pub async fn run(self) -> Result<AnalysisReport, SubmissionError> {
        self.service
            .submit_pack(self.file)
            .await
            .map_err(SubmissionError::from)
    }
}

pub struct UploadWorkflow<A: ?Sized> {
    service: Arc<A>,
    file: Option<PackFile>,
    phase: SubmissionPhase,
}

impl<A: AnalysisService + ?Sized> UploadWorkflow<A> {
    pub fn new(service: Arc<A>) -> Self {
        Self {
            service,
            file: None,
            phase: SubmissionPhase::Idle { prior: None },
        }
    }

    pub fn phase(&self) -> &SubmissionPhase {
        &self.phase
    }

    pub fn file(&self) -> Option<&PackFile> {
        self.file.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, SubmissionPhase::Submitting)
    }

    /// Whether a submit would be admitted right now.
    pub fn can_submit(&self) -> bool {
        self.file.is_some() && !self.is_submitting()
    }

    /// The report on display, from this run or the previous one.
    pub fn report(&self) -> Option<&AnalysisReport> {
        match &self.phase {
            SubmissionPhase::Succeeded(report)
            | SubmissionPhase::Idle {
                prior: Some(Outcome::Report(report)),
            } => Some(report),
            _ => None,
        }
    }

    /// The error on display, from this run or the previous one.
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            SubmissionPhase::Failed(message)
            | SubmissionPhase::Idle {
                prior: Some(Outcome::Error(message)),
            } => Some(message),
            _ => None,
        }
    }

    /// Choose (or clear) the file for the next submission.
    ///
    /// A finished submission goes back to `Idle`, keeping its outcome on
    /// display. While submitting, only the selection changes.
    pub fn select_file(&mut self, file: Option<PackFile>) {
        debug!(file_name = ?file.as_ref().map(PackFile::file_name), "pack file selected");
        self.file = file;
        if !self.is_submitting() {
            self.phase = SubmissionPhase::Idle {
                prior: self.phase.outcome(),
            };
        }
    }

    /// Enter `Submitting` and hand out the submission to run.
    ///
    /// Returns `None`, changing nothing, when a submission is already in
    /// flight or no file is selected. The previous report or error is
    /// cleared on entry.
    pub fn begin_submit(&mut self) -> Option<PendingSubmission<A>> {
        if self.is_submitting() {
            debug!("submission already in flight, ignoring submit");
            return None;
        }
        let Some(file) = self.file.clone() else {
            debug!("no pack file selected, ignoring submit");
            return None;
        };

        info!(
            file_name = file.file_name(),
            content_type = file.content_type(),
            bytes = file.len(),
            "submitting legal pack"
        );
        self.phase = SubmissionPhase::Submitting;

        Some(PendingSubmission {
            service: Arc::clone(&self.service),
            file,
        })
    }

    /// Record the result of the in-flight submission.
    pub fn finish(&mut self, result: Result<AnalysisReport, SubmissionError>) {
        if !self.is_submitting() {
            warn!("submission result arrived with nothing in flight, ignoring");
            return;
        }

        self.phase = match result {
            Ok(report) => {
                info!(
                    report_len = report.report_markdown.len(),
                    flags = report.flags.len(),
                    "analysis report received"
                );
                SubmissionPhase::Succeeded(report)
            }
            Err(err) => {
                warn!(status = ?err.status, error = %err, "analysis submission failed");
                SubmissionPhase::Failed(err.message)
            }
        };
    }

    /// Submit the selected file and wait for the outcome.
    ///
    /// A refused submit leaves the phase untouched.
    pub async fn submit(&mut self) -> &SubmissionPhase {
        if let Some(pending) = self.begin_submit() {
            let result = pending.run().await;
            self.finish(result);
        }
        &self.phase
    }
}
