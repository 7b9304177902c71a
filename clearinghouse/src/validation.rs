use intake::{has_text, pointer_in_range, Address, Claim};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::status::{check_transition, TransitionError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<String>) -> ValidationResult {
        ValidationResult { is_valid: errors.is_empty(), errors }
    }
}

/// Checks every field rule and reports all failures at once.
pub fn validate_claim(claim: &Claim) -> ValidationResult {
    let mut errors = Vec::new();

    validate_charge_total(claim, &mut errors);
    validate_required_fields(claim, &mut errors);
    validate_line_charges(claim, &mut errors);
    validate_data_ownership(claim, &mut errors);
    validate_line_shapes(claim, &mut errors);
    validate_formats(claim, &mut errors);

    ValidationResult::from_errors(errors)
}

/// Gate for updates: an illegal status change is returned as `Err` before any field checks run.
/// Unparseable statuses skip the gate and surface through field validation instead.
pub fn validate_update(previous: &Claim, updated: &Claim) -> Result<ValidationResult, TransitionError> {
    if let (Ok(from), Ok(to)) = (previous.status(), updated.status()) {
        check_transition(from, to)?;
    }
    Ok(validate_claim(updated))
}

fn validate_charge_total(claim: &Claim, errors: &mut Vec<String>) {
    let line_sum = claim.line_charge_sum();
    if line_sum != claim.total_charge {
        errors.push(format!(
            "Total charge ({}) does not match sum of line charges ({:.2})",
            claim.total_charge.normalize(),
            line_sum
        ));
    }
}

fn validate_required_fields(claim: &Claim, errors: &mut Vec<String>) {
    if !has_text(&claim.claim_number) {
        errors.push("Claim number is required".to_string());
    }

    if !has_text(&claim.insurance_plan_id) {
        errors.push("Insurance plan is required".to_string());
    }

    if claim.status().is_err() {
        errors.push(format!("Invalid claim status: {}", claim.status));
    }

    if claim.total_charge <= Decimal::ZERO {
        errors.push("Total charge must be positive".to_string());
    }
}

fn validate_line_charges(claim: &Claim, errors: &mut Vec<String>) {
    for line in &claim.lines {
        if line.charge <= Decimal::ZERO {
            errors.push(format!("Line {}: Charge must be positive", line.line_number));
        }
    }
}

fn validate_data_ownership(claim: &Claim, errors: &mut Vec<String>) {
    if has_text(&claim.patient_id) && !has_text(&claim.user_id) {
        errors.push("User ID is required for HIPAA compliance when patient ID is provided".to_string());
    }
}

fn validate_line_shapes(claim: &Claim, errors: &mut Vec<String>) {
    let mut sequence_reported = false;
    let diagnosis_count = claim.diagnosis_codes().len();

    for (i, line) in claim.lines.iter().enumerate() {
        if line.units < 1 {
            errors.push(format!("Line {}: Units must be at least 1", line.line_number));
        }

        let code = line.cpt_code.trim();
        if code.len() != 5 || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            errors.push(format!("Line {}: CPT code must be 5 alphanumeric characters", line.line_number));
        }

        if let Some(ref pointer) = line.diagnosis_pointer {
            if pointer.chars().count() > 4 {
                errors.push(format!("Line {}: Diagnosis pointer must be at most 4 characters", line.line_number));
            }
        }

        let positions = line.pointer_positions().unwrap_or_default();
        if let Some(bad) = positions.iter().find(|p| !pointer_in_range(p, diagnosis_count)) {
            errors.push(format!("Line {}: Diagnosis pointer {} is out of range", line.line_number, bad));
        }

        if !sequence_reported && line.line_number as usize != i + 1 {
            errors.push(format!("Line {}: Line numbers must be sequential starting at 1", line.line_number));
            sequence_reported = true;
        }
    }
}

fn validate_formats(claim: &Claim, errors: &mut Vec<String>) {
    // NPI validation (10 digits)
    if let Some(ref npi) = claim.provider.npi {
        if npi.len() != 10 || !npi.chars().all(|c| c.is_ascii_digit()) {
            errors.push("Provider NPI must be exactly 10 digits".to_string());
        }
    }

    // EIN validation (XX-XXXXXXX or 9 digits)
    if let Some(ref ein) = claim.provider.tax_id {
        let dashed = ein.is_ascii() && ein.len() == 10 && ein.chars().nth(2) == Some('-') &&
            ein[..2].chars().all(|c| c.is_ascii_digit()) &&
            ein[3..].chars().all(|c| c.is_ascii_digit());
        let bare = ein.len() == 9 && ein.chars().all(|c| c.is_ascii_digit());
        if !dashed && !bare {
            errors.push("Provider tax ID must match format XX-XXXXXXX".to_string());
        }
    }

    let zip_check = |field: &str, address: &Option<Address>, errors: &mut Vec<String>| {
        if let Some(zip) = address.as_ref().and_then(|a| a.zip.as_ref()) {
            let valid_zip = zip.len() == 5 && zip.chars().all(|c| c.is_ascii_digit()) ||
                (zip.is_ascii() && zip.len() == 10 && zip.chars().nth(5) == Some('-') &&
                 zip[..5].chars().all(|c| c.is_ascii_digit()) &&
                 zip[6..].chars().all(|c| c.is_ascii_digit()));
            if !valid_zip {
                errors.push(format!("{} ZIP code must be XXXXX or XXXXX-XXXX format", field));
            }
        }
    };

    zip_check("Patient", &claim.patient.address, errors);
    zip_check("Provider", &claim.provider.address, errors);
}
