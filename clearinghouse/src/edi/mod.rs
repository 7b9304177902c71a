pub mod control;
pub mod encoder;
pub mod segment;

pub use control::{next_control_number, ControlNumberGenerator, ControlNumbers};
pub use encoder::{generate_837, Edi837Encoder};
pub use segment::Segment;

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("claim has no billable lines")]
    NoBillableLines,
    #[error("invalid claim data: {0}")]
    InvalidClaimData(String),
}

/// ISA15 usage indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Usage {
    #[default]
    Test,
    Production,
}

impl Usage {
    pub fn code(&self) -> &'static str {
        match self {
            Usage::Test => "T",
            Usage::Production => "P",
        }
    }
}

/// Who is sending the interchange and to whom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitterConfig {
    pub sender_id: String,
    pub receiver_id: String,
    pub submitter_name: String,
    pub submitter_contact: Option<String>,
    pub submitter_phone: Option<String>,
    pub receiver_name: String,
    pub usage: Usage,
}

impl Default for SubmitterConfig {
    fn default() -> Self {
        SubmitterConfig {
            sender_id: "LABSUBMITTER".to_string(),
            receiver_id: "CLEARINGHOUSE".to_string(),
            submitter_name: "LAB BILLING SERVICES".to_string(),
            submitter_contact: None,
            submitter_phone: None,
            receiver_name: "CLEARINGHOUSE".to_string(),
            usage: Usage::Test,
        }
    }
}

/// An encoded 837P interchange for one claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdiDocument {
    pub id: Uuid,
    pub claim_id: String,
    pub control_numbers: ControlNumbers,
    pub created_at: DateTime<Utc>,
    pub content: String,
}

impl EdiDocument {
    pub fn segment_count(&self) -> usize {
        self.content.matches(segment::SEGMENT_TERMINATOR).count()
    }
}
