pub mod types;

pub use types::{InsurancePlan, PlanType, Relationship};

use chrono::NaiveDate;

impl PlanType {
    /// Claim filing indicator code (SBR09) for the payer category.
    pub fn claim_filing_indicator(&self) -> &'static str {
        match self {
            PlanType::Commercial => "CI",
            PlanType::Medicare => "MB",
            PlanType::Medicaid => "MC",
            PlanType::Tricare => "CH",
            PlanType::Hmo => "HM",
            PlanType::Ppo => "12",
            PlanType::SelfPay => "ZZ",
        }
    }
}

impl Relationship {
    /// Individual relationship code used in SBR02 / PAT01.
    pub fn x12_code(&self) -> &'static str {
        match self {
            Relationship::SelfInsured => "18",
            Relationship::Spouse => "01",
            Relationship::Child => "19",
            Relationship::Other => "G8",
        }
    }
}

impl InsurancePlan {
    pub fn patient_is_subscriber(&self) -> bool {
        self.relationship == Relationship::SelfInsured
    }

    /// Coverage window is inclusive on both ends; an open termination date never lapses.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        if date < self.effective_date {
            return false;
        }
        match self.termination_date {
            Some(end) => date <= end,
            None => true,
        }
    }
}

/// Returns the first date in `dates` the plan does not cover, if any.
pub fn first_uncovered_date<I>(plan: &InsurancePlan, dates: I) -> Option<NaiveDate>
where
    I: IntoIterator<Item = NaiveDate>,
{
    dates.into_iter().find(|date| !plan.is_active_on(*date))
}
