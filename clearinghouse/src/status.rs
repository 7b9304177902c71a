use chrono::Utc;
use intake::{Claim, ClaimStatus};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Invalid status transition from {from} to {to}")]
    Illegal { from: ClaimStatus, to: ClaimStatus },
    #[error("Cannot transition claim with unknown status {0}")]
    UnknownStatus(String),
}

/// Outgoing edges of the claim lifecycle. `Paid` and `Cancelled` are terminal.
pub fn allowed_transitions(from: ClaimStatus) -> &'static [ClaimStatus] {
    match from {
        ClaimStatus::Draft => &[ClaimStatus::Submitted],
        ClaimStatus::Submitted => &[ClaimStatus::Accepted, ClaimStatus::Rejected],
        ClaimStatus::Accepted => &[ClaimStatus::Paid, ClaimStatus::Denied],
        ClaimStatus::Rejected => &[ClaimStatus::Draft],
        ClaimStatus::Denied => &[ClaimStatus::Draft],
        ClaimStatus::Paid | ClaimStatus::Cancelled => &[],
    }
}

/// Same-state updates are always allowed.
pub fn can_transition(from: ClaimStatus, to: ClaimStatus) -> bool {
    from == to || allowed_transitions(from).contains(&to)
}

pub fn is_terminal(status: ClaimStatus) -> bool {
    allowed_transitions(status).is_empty()
}

pub fn check_transition(from: ClaimStatus, to: ClaimStatus) -> Result<(), TransitionError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(TransitionError::Illegal { from, to })
    }
}

/// Moves `claim` to `to`, stamping submission and processing times.
pub fn transition(claim: &mut Claim, to: ClaimStatus) -> Result<(), TransitionError> {
    let from = claim
        .status()
        .map_err(|unknown| TransitionError::UnknownStatus(unknown.0))?;
    check_transition(from, to)?;
    if from == to {
        return Ok(());
    }

    let now = Utc::now();
    match to {
        ClaimStatus::Submitted => claim.submitted_at = Some(now),
        ClaimStatus::Accepted | ClaimStatus::Rejected | ClaimStatus::Denied | ClaimStatus::Paid => {
            claim.processed_at = Some(now)
        }
        ClaimStatus::Draft => claim.processed_at = None,
        ClaimStatus::Cancelled => {}
    }
    claim.set_status(to);
    Ok(())
}
