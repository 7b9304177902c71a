use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clearinghouse::{prepare_submission, Edi837Encoder, EdiDocument, SubmissionError, SubmitterConfig};
use intake::{ClaimSubmission, IntakeError};
use log::{error, info, warn};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutcomeError {
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error("Failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// What happened to one claim submission in a batch.
#[derive(Debug)]
pub struct SubmissionOutcome {
    pub claim_id: String,
    pub claim_number: Option<String>,
    pub total_charge: Decimal,
    pub result: Result<EdiDocument, OutcomeError>,
}

impl SubmissionOutcome {
    pub fn is_accepted(&self) -> bool {
        self.result.is_ok()
    }

    /// Validation failures are reported one per entry; any other failure is a single message.
    pub fn errors(&self) -> Vec<String> {
        match &self.result {
            Ok(_) => Vec::new(),
            Err(OutcomeError::Submission(SubmissionError::Validation(errors))) => errors.clone(),
            Err(e) => vec![e.to_string()],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub accepted: usize,
    pub rejected: usize,
    pub total_billed: Decimal,
    /// Error messages with how often they occurred, most frequent first.
    pub error_counts: Vec<(String, usize)>,
}

pub fn process_submission(submission: &ClaimSubmission, encoder: &Edi837Encoder) -> SubmissionOutcome {
    let claim = &submission.claim;
    let result = prepare_submission(claim, &submission.insurance_plan, encoder);

    match &result {
        Ok(document) => info!(
            "Claim {} encoded ({} segments)",
            claim.id,
            document.segment_count()
        ),
        Err(e) => warn!("Claim {} rejected: {}", claim.id, e),
    }

    SubmissionOutcome {
        claim_id: claim.id.clone(),
        claim_number: claim.claim_number.clone(),
        total_charge: claim.total_charge,
        result: result.map_err(OutcomeError::from),
    }
}

pub fn summarize(outcomes: &[SubmissionOutcome]) -> BatchSummary {
    let mut summary = BatchSummary::default();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for outcome in outcomes {
        if outcome.is_accepted() {
            summary.accepted += 1;
            summary.total_billed += outcome.total_charge;
        } else {
            summary.rejected += 1;
            for error in outcome.errors() {
                *counts.entry(error).or_insert(0) += 1;
            }
        }
    }

    let mut error_counts: Vec<(String, usize)> = counts.into_iter().collect();
    error_counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    summary.error_counts = error_counts;
    summary
}

/// Reads a submitter configuration; missing fields take their defaults.
pub fn load_submitter_config(path: &str) -> Result<SubmitterConfig, IntakeError> {
    let contents = fs::read_to_string(path)?;
    let config: SubmitterConfig = serde_json::from_str(&contents)?;
    Ok(config)
}

/// `<output_dir>/<claim number>.837`, falling back to the claim id when there is no claim number.
pub fn output_path(output_dir: &Path, outcome: &SubmissionOutcome) -> PathBuf {
    let stem = outcome
        .claim_number
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(outcome.claim_id.as_str());
    let file_name: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    output_dir.join(format!("{}.837", file_name))
}

/// Writes the encoded document of an accepted outcome and returns where it went.
/// Rejected outcomes write nothing; a failed write turns the outcome into a rejection.
pub fn write_document(output_dir: &Path, outcome: &mut SubmissionOutcome) -> Option<PathBuf> {
    let Ok(document) = &outcome.result else {
        return None;
    };
    let path = output_path(output_dir, outcome);
    match fs::write(&path, &document.content) {
        Ok(()) => Some(path),
        Err(source) => {
            error!("Failed to write document for claim {}: {}", outcome.claim_id, source);
            outcome.result = Err(OutcomeError::Write { path, source });
            None
        }
    }
}
