use chrono::NaiveDate;
use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsurancePlan {
    pub id: String,
    pub payer_name: String,
    pub payer_id: String,
    pub member_id: String,
    pub group_number: Option<String>,
    pub group_name: Option<String>,
    pub plan_type: PlanType,
    #[serde(default)]
    pub relationship: Relationship,
    pub effective_date: NaiveDate,
    pub termination_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanType {
    Commercial,
    Medicare,
    Medicaid,
    Tricare,
    Hmo,
    Ppo,
    SelfPay,
}

/// Patient's relationship to the insured subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    #[default]
    #[serde(rename = "self")]
    SelfInsured,
    Spouse,
    Child,
    Other,
}
