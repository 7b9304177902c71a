pub mod cpt;
pub mod icd;
pub mod types;

pub use cpt::{cpt_description, standard_charge, GENERAL_HEALTH_PANEL};
pub use icd::{icd_description, normalize_category, GENERAL_HEALTH_EXAM};
pub use types::LabTest;

use chrono::NaiveDate;
use intake::ClaimLine;
use rust_decimal::Decimal;

/// Panel codes only apply when a report spans at least this many categories.
const PANEL_CATEGORY_THRESHOLD: usize = 3;

/// Most diagnosis codes a single service line may point at.
const MAX_LINE_DIAGNOSES: usize = 4;

pub const GENERIC_DESCRIPTION: &str = "Laboratory test";

/// Procedure codes for a report, in first-match order without duplicates.
pub fn generate_cpt_codes(tests: &[LabTest]) -> Vec<String> {
    let mut codes: Vec<String> = Vec::new();

    for test in tests {
        if let Some(code) = cpt::TEST_CPT.get(test_key(test).as_str()) {
            push_unique(&mut codes, code);
        }
    }

    if codes.is_empty() {
        let categories = distinct_categories(tests);
        if categories.len() >= PANEL_CATEGORY_THRESHOLD {
            for (required, code) in cpt::PANEL_RULES {
                if required.iter().all(|needed| categories.iter().any(|c| c == needed)) {
                    push_unique(&mut codes, code);
                }
            }
        }
    }

    if codes.is_empty() {
        codes.push(GENERAL_HEALTH_PANEL.to_string());
    }
    codes
}

/// Diagnosis codes for a report: abnormal findings first, then a screening code for each
/// tested category that produced no abnormal finding.
pub fn generate_icd_codes(tests: &[LabTest]) -> Vec<String> {
    let mut codes: Vec<String> = Vec::new();
    let mut tested: Vec<String> = Vec::new();
    let mut flagged: Vec<String> = Vec::new();

    for test in tests {
        let category = test_category(test);

        if test.abnormal {
            let code = icd::TEST_ICD
                .get(test_key(test).as_str())
                .or_else(|| icd::CATEGORY_ICD.get(category.as_deref()?))
                .copied();
            if let Some(code) = code {
                push_unique(&mut codes, code);
                if let Some(category) = &category {
                    push_unique(&mut flagged, category);
                }
            }
        }

        if let Some(category) = &category {
            push_unique(&mut tested, category);
        }
    }

    for category in tested.iter().filter(|c| !flagged.contains(*c)) {
        if let Some(code) = icd::SCREENING_ICD.get(category.as_str()) {
            push_unique(&mut codes, code);
        }
    }

    if codes.is_empty() {
        codes.push(GENERAL_HEALTH_EXAM.to_string());
    }
    codes
}

/// Human-readable text for a CPT or ICD-10 code.
pub fn describe_code(code: &str) -> &'static str {
    cpt_description(code)
        .or_else(|| icd_description(code))
        .unwrap_or(GENERIC_DESCRIPTION)
}

/// Billable lines for a report: one per generated procedure code, all dated `service_date`
/// and pointing at the report's leading diagnoses.
pub fn build_claim_lines(tests: &[LabTest], service_date: NaiveDate) -> Vec<ClaimLine> {
    let diagnoses: Vec<String> = generate_icd_codes(tests)
        .into_iter()
        .take(MAX_LINE_DIAGNOSES)
        .collect();
    let pointer: String = (1..=diagnoses.len()).map(|position| position.to_string()).collect();

    generate_cpt_codes(tests)
        .into_iter()
        .enumerate()
        .map(|(index, cpt_code)| ClaimLine {
            line_number: index as u32 + 1,
            description: describe_code(&cpt_code).to_string(),
            charge: standard_charge(&cpt_code),
            cpt_code,
            units: 1,
            service_date,
            diagnosis_codes: diagnoses.clone(),
            diagnosis_pointer: Some(pointer.clone()),
        })
        .collect()
}

pub fn sum_line_charges(lines: &[ClaimLine]) -> Decimal {
    lines.iter().map(ClaimLine::line_total).sum()
}

fn test_key(test: &LabTest) -> String {
    test.name.trim().to_lowercase()
}

/// The report's label for the test, else the category its name belongs to.
fn test_category(test: &LabTest) -> Option<String> {
    match test.category.as_deref().map(normalize_category) {
        Some(category) if !category.is_empty() => Some(category),
        _ => icd::TEST_CATEGORY
            .get(test_key(test).as_str())
            .map(|category| category.to_string()),
    }
}

fn distinct_categories(tests: &[LabTest]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for category in tests.iter().filter_map(|test| test.category.as_deref()) {
        let category = normalize_category(category);
        if !category.is_empty() && !categories.contains(&category) {
            categories.push(category);
        }
    }
    categories
}

fn push_unique(codes: &mut Vec<String>, code: &str) {
    if !codes.iter().any(|existing| existing == code) {
        codes.push(code.to_string());
    }
}
