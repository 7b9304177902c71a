use chrono::{DateTime, NaiveDate, Utc};
use insurance::InsurancePlan;
use rust_decimal::Decimal;
use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub id: String,
    pub claim_number: Option<String>,
    /// Raw status code as stored by the claims subsystem, see `Claim::status`.
    pub status: String,
    pub total_charge: Decimal,
    #[serde(default)]
    pub patient_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    pub insurance_plan_id: Option<String>,
    #[serde(default)]
    pub report_id: Option<String>,
    #[serde(default = "default_place_of_service")]
    pub place_of_service: String,
    pub patient: Patient,
    pub provider: Provider,
    pub lines: Vec<ClaimLine>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub processed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub denial_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimLine {
    pub line_number: u32,
    pub cpt_code: String,
    pub description: String,
    pub charge: Decimal,
    #[serde(default = "default_units")]
    pub units: u32,
    pub service_date: NaiveDate,
    #[serde(default)]
    pub diagnosis_codes: Vec<String>,
    #[serde(default)]
    pub diagnosis_pointer: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimStatus {
    Draft,
    Submitted,
    Accepted,
    Rejected,
    Denied,
    Paid,
    Cancelled,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "m")]
    Male,
    #[serde(rename = "f")]
    Female,
    #[serde(rename = "u")]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub name: Option<String>,
    pub npi: Option<String>,
    pub tax_id: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Address>,
}

/// One intake record: a claim plus the plan it bills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimSubmission {
    pub claim: Claim,
    pub insurance_plan: InsurancePlan,
}

fn default_units() -> u32 {
    1
}

fn default_place_of_service() -> String {
    "81".to_string()
}
