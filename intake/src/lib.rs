pub mod types;

// Re-export all types for easier access from other crates
pub use types::*;

use rust_decimal::Decimal;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Failed to open file: {0}")]
    Open(#[from] std::io::Error),
    #[error("Failed to read line: {0}")]
    Read(std::io::Error),
    #[error("Line is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
    #[error("Failed to parse line: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown claim status: {0}")]
pub struct UnknownStatus(pub String);

#[derive(Clone, Debug)]
pub struct Config {
    pub claims_path: String,
    pub output_dir: String,
    pub submitter_config_path: Option<String>,
}

impl Config {
    pub fn build(mut args: impl Iterator<Item = String>) -> Result<Config, IntakeError> {
        args.next();

        let claims_path = match args.next() {
            Some(arg) => arg,
            None => return Err(IntakeError::Config("Didn't get a claims file path".to_string())),
        };

        let output_dir = match args.next() {
            Some(arg) => arg,
            None => return Err(IntakeError::Config("Didn't get an output directory".to_string())),
        };

        let submitter_config_path = args.next();

        Ok(Config { claims_path, output_dir, submitter_config_path })
    }
}

/// Yields the non-blank lines of a JSON-lines claims file, one result per line.
/// A line that is not UTF-8 is reported and skipped; an I/O error is reported once and ends the stream.
pub fn read_file(config: &Config) -> Result<impl Iterator<Item = Result<String, IntakeError>>, IntakeError> {
    let file = File::open(&config.claims_path)?;
    let reader = BufReader::new(file);
    let mut failed = false;
    Ok(reader
        .split(b'\n')
        .map_while(move |bytes| {
            if failed {
                return None;
            }
            match bytes {
                Ok(bytes) => Some(decode_line(bytes)),
                Err(e) => {
                    failed = true;
                    Some(Err(IntakeError::Read(e)))
                }
            }
        })
        .filter(|line| !matches!(line, Ok(text) if text.trim().is_empty()))
    )
}

fn decode_line(bytes: Vec<u8>) -> Result<String, IntakeError> {
    let mut line = String::from_utf8(bytes)?;
    if line.ends_with('\r') {
        line.pop();
    }
    Ok(line)
}

pub fn parse_line(line: &str) -> Result<ClaimSubmission, IntakeError> {
    let submission: ClaimSubmission = serde_json::from_str(line)?;
    Ok(submission)
}

pub fn parse_claim(line: &str) -> Result<Claim, IntakeError> {
    let claim: Claim = serde_json::from_str(line)?;
    Ok(claim)
}

impl ClaimStatus {
    pub const ALL: [ClaimStatus; 7] = [
        ClaimStatus::Draft,
        ClaimStatus::Submitted,
        ClaimStatus::Accepted,
        ClaimStatus::Rejected,
        ClaimStatus::Denied,
        ClaimStatus::Paid,
        ClaimStatus::Cancelled,
    ];

    pub fn initial() -> ClaimStatus {
        ClaimStatus::Draft
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Draft => "DRAFT",
            ClaimStatus::Submitted => "SUBMITTED",
            ClaimStatus::Accepted => "ACCEPTED",
            ClaimStatus::Rejected => "REJECTED",
            ClaimStatus::Denied => "DENIED",
            ClaimStatus::Paid => "PAID",
            ClaimStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClaimStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

impl Gender {
    pub fn x12_code(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
            Gender::Unknown => "U",
        }
    }
}

impl Claim {
    pub fn status(&self) -> Result<ClaimStatus, UnknownStatus> {
        self.status.parse()
    }

    pub fn set_status(&mut self, status: ClaimStatus) {
        self.status = status.to_string();
    }

    /// Sum of `charge * units` over every line.
    pub fn line_charge_sum(&self) -> Decimal {
        self.lines.iter().map(ClaimLine::line_total).sum()
    }

    /// Diagnosis codes across all lines, deduplicated in first-seen order.
    pub fn diagnosis_codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = Vec::new();
        for code in self.lines.iter().flat_map(|line| line.diagnosis_codes.iter()) {
            let code = code.trim();
            if !code.is_empty() && !codes.iter().any(|seen| seen == code) {
                codes.push(code.to_string());
            }
        }
        codes
    }
}

impl ClaimLine {
    pub fn line_total(&self) -> Decimal {
        self.charge * Decimal::from(self.units)
    }

    /// The line's own diagnosis pointer split into positions. `"12"` and `"1:2"` both give
    /// `["1", "2"]`; a missing or blank pointer gives `None`.
    pub fn pointer_positions(&self) -> Option<Vec<String>> {
        let pointer = self
            .diagnosis_pointer
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())?;
        let parts: Vec<String> = if pointer.contains(':') {
            pointer.split(':').map(|p| p.trim().to_string()).collect()
        } else {
            pointer.chars().map(|c| c.to_string()).collect()
        };
        Some(parts.into_iter().filter(|p| !p.is_empty()).collect())
    }
}

/// Whether `position` names one of `count` claim-level diagnoses (1-based).
pub fn pointer_in_range(position: &str, count: usize) -> bool {
    position.parse::<usize>().map_or(false, |n| n >= 1 && n <= count)
}

/// Present and not blank.
pub fn has_text(value: &Option<String>) -> bool {
    value.as_deref().map_or(false, |v| !v.trim().is_empty())
}
