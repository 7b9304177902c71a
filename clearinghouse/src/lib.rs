pub mod edi;
pub mod status;
pub mod validation;

pub use edi::{
    generate_837, next_control_number, ControlNumberGenerator, ControlNumbers, Edi837Encoder,
    EdiDocument, EncodeError, Segment, SubmitterConfig, Usage,
};
pub use status::{allowed_transitions, can_transition, check_transition, is_terminal, transition, TransitionError};
pub use validation::{validate_claim, validate_update, ValidationResult};

use chrono::NaiveDate;
use insurance::{first_uncovered_date, InsurancePlan};
use intake::{Claim, ClaimStatus};
use log::{info, warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("claim failed validation: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("insurance plan {plan_id} does not cover service date {date}")]
    CoverageInactive { plan_id: String, date: NaiveDate },
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Encoding(#[from] EncodeError),
}

/// Validates a claim, confirms coverage for every service date and encodes it.
pub fn prepare_submission(
    claim: &Claim,
    plan: &InsurancePlan,
    encoder: &Edi837Encoder,
) -> Result<EdiDocument, SubmissionError> {
    let result = validate_claim(claim);
    if !result.is_valid {
        warn!("claim {} failed validation with {} error(s)", claim.id, result.errors.len());
        return Err(SubmissionError::Validation(result.errors));
    }

    if let Some(date) = first_uncovered_date(plan, claim.lines.iter().map(|line| line.service_date)) {
        warn!("claim {} has a service date outside plan {} coverage", claim.id, plan.id);
        return Err(SubmissionError::CoverageInactive { plan_id: plan.id.clone(), date });
    }

    let document = encoder.generate(claim, plan)?;
    info!(
        "prepared 837P for claim {} (interchange {})",
        claim.id, document.control_numbers.interchange
    );
    Ok(document)
}

/// Marks a prepared claim as submitted.
pub fn submit_claim(claim: &mut Claim) -> Result<(), SubmissionError> {
    transition(claim, ClaimStatus::Submitted)?;
    Ok(())
}
