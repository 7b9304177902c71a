use chrono::NaiveDate;
use coding::*;
use rust_decimal::Decimal;
use std::str::FromStr;

fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

fn service_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
}

#[test]
fn test_empty_report_yields_defaults() {
    assert_eq!(generate_cpt_codes(&[]), vec!["80050"]);
    assert_eq!(generate_icd_codes(&[]), vec!["Z00.00"]);
}

#[test]
fn test_exact_name_match_case_insensitive() {
    let tests = vec![
        LabTest::new("Hemoglobin A1c", Some("Diabetes")),
        LabTest::new("  TSH ", None),
    ];
    assert_eq!(generate_cpt_codes(&tests), vec!["83036", "84443"]);
}

#[test]
fn test_duplicate_tests_are_deduplicated_in_order() {
    let tests = vec![
        LabTest::new("CBC", None),
        LabTest::new("Glucose", None),
        LabTest::new("complete blood count", None),
        LabTest::new("glucose", None),
    ];
    assert_eq!(generate_cpt_codes(&tests), vec!["85025", "82947"]);
}

#[test]
fn test_panel_codes_from_categories() {
    let tests = vec![
        LabTest::new("Marker X", Some("Metabolic")),
        LabTest::new("Marker Y", Some("electrolytes")),
        LabTest::new("Marker Z", Some("Lipids")),
    ];
    assert_eq!(generate_cpt_codes(&tests), vec!["80053", "80061"]);
}

#[test]
fn test_panel_codes_use_category_aliases() {
    let tests = vec![
        LabTest::new("Marker X", Some("Blood")),
        LabTest::new("Marker Y", Some("Renal")),
        LabTest::new("Marker Z", Some("Hepatic")),
    ];
    assert_eq!(generate_cpt_codes(&tests), vec!["85025", "80076", "80069"]);
}

#[test]
fn test_metabolic_without_electrolytes_gets_no_cmp() {
    let tests = vec![
        LabTest::new("Marker X", Some("Metabolic")),
        LabTest::new("Marker Y", Some("Thyroid")),
        LabTest::new("Marker Z", Some("Vitamins")),
    ];
    assert_eq!(generate_cpt_codes(&tests), vec!["84443"]);
}

#[test]
fn test_fewer_than_three_categories_falls_back() {
    let tests = vec![
        LabTest::new("Marker X", Some("Metabolic")),
        LabTest::new("Marker Y", Some("Electrolytes")),
    ];
    assert_eq!(generate_cpt_codes(&tests), vec!["80050"]);
}

#[test]
fn test_test_match_suppresses_panel_rules() {
    let tests = vec![
        LabTest::new("Glucose", Some("Metabolic")),
        LabTest::new("Marker Y", Some("Electrolytes")),
        LabTest::new("Marker Z", Some("Lipids")),
    ];
    assert_eq!(generate_cpt_codes(&tests), vec!["82947"]);
}

#[test]
fn test_icd_abnormal_codes_before_screening_codes() {
    let tests = vec![
        LabTest::new("LDL", Some("Lipids")).abnormal(),
        LabTest::new("TSH", Some("Thyroid")),
        LabTest::new("Vitamin D", Some("Vitamins")).abnormal(),
    ];
    assert_eq!(generate_icd_codes(&tests), vec!["E78.00", "E55.9", "Z13.29"]);
}

#[test]
fn test_icd_abnormal_finding_replaces_screening_for_category() {
    let tests = vec![
        LabTest::new("HDL", None),
        LabTest::new("LDL", None).abnormal(),
    ];
    assert_eq!(generate_icd_codes(&tests), vec!["E78.00"]);
}

#[test]
fn test_icd_codes_from_category_when_test_unknown() {
    let tests = vec![
        LabTest::new("Apolipoprotein B", Some("Lipid")).abnormal(),
        LabTest::new("Sodium", None).abnormal(),
        LabTest::new("Mystery", None).abnormal(),
    ];
    assert_eq!(generate_icd_codes(&tests), vec!["E78.5", "E87.8"]);
}

#[test]
fn test_icd_screening_codes_for_normal_report() {
    let tests = vec![
        LabTest::new("Glucose", Some("Diabetes")),
        LabTest::new("LDL", Some("Lipids")),
        LabTest::new("HDL", None),
        LabTest::new("TSH", Some("Thyroid")),
        LabTest::new("CBC", Some("Blood")),
    ];
    assert_eq!(generate_icd_codes(&tests), vec!["Z13.1", "Z13.220", "Z13.29", "Z13.0"]);
}

#[test]
fn test_icd_fallback_for_uncategorized_normal_tests() {
    let tests = vec![LabTest::new("Mystery", None)];
    assert_eq!(generate_icd_codes(&tests), vec!["Z00.00"]);
}

#[test]
fn test_mapping_is_idempotent() {
    let tests = vec![
        LabTest::new("Ferritin", Some("Hematology")).abnormal(),
        LabTest::new("ALT", Some("Liver")).abnormal(),
        LabTest::new("Creatinine", None),
        LabTest::new("HDL", None).abnormal(),
    ];
    assert_eq!(generate_cpt_codes(&tests), generate_cpt_codes(&tests));
    assert_eq!(generate_icd_codes(&tests), generate_icd_codes(&tests));
}

#[test]
fn test_descriptions() {
    assert_eq!(describe_code("80053"), "Comprehensive metabolic panel");
    assert_eq!(describe_code("Z00.00"), "Encounter for general adult medical examination without abnormal findings");
    assert_eq!(describe_code("99999"), "Laboratory test");
    assert_eq!(cpt_description("99999"), None);
    assert_eq!(icd_description("E78.5"), Some("Hyperlipidemia, unspecified"));
    assert_eq!(describe_code("Z13.220"), "Encounter for screening for lipoid disorders");
}

#[test]
fn test_standard_charges() {
    assert_eq!(standard_charge("80053"), dec("150.00"));
    assert_eq!(standard_charge("85025"), dec("45.50"));
    assert_eq!(standard_charge("12345"), dec("50.00"));
}

#[test]
fn test_build_claim_lines() {
    let tests = vec![
        LabTest::new("CMP", Some("Metabolic")),
        LabTest::new("CBC", Some("Hematology")).abnormal(),
    ];
    let lines = build_claim_lines(&tests, service_date());

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].line_number, 1);
    assert_eq!(lines[0].cpt_code, "80053");
    assert_eq!(lines[0].description, "Comprehensive metabolic panel");
    assert_eq!(lines[1].line_number, 2);
    assert_eq!(lines[1].cpt_code, "85025");
    assert_eq!(lines[1].units, 1);
    assert_eq!(lines[1].service_date, service_date());
    assert_eq!(lines[1].diagnosis_codes, vec!["D75.9", "Z13.228"]);
    assert_eq!(lines[1].diagnosis_pointer.as_deref(), Some("12"));
    assert_eq!(sum_line_charges(&lines), dec("195.50"));
}

#[test]
fn test_build_claim_lines_for_empty_report() {
    let lines = build_claim_lines(&[], service_date());
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].cpt_code, "80050");
    assert_eq!(lines[0].diagnosis_codes, vec!["Z00.00"]);
    assert_eq!(lines[0].charge, dec("250.00"));
}

#[test]
fn test_build_claim_lines_caps_pointers_at_four() {
    let tests = vec![
        LabTest::new("Glucose", None).abnormal(),
        LabTest::new("LDL", None).abnormal(),
        LabTest::new("TSH", None).abnormal(),
        LabTest::new("Vitamin D", None).abnormal(),
        LabTest::new("PSA", None).abnormal(),
    ];
    let lines = build_claim_lines(&tests, service_date());
    assert_eq!(lines[0].diagnosis_codes.len(), 4);
    assert_eq!(lines[0].diagnosis_pointer.as_deref(), Some("1234"));
}

#[test]
fn test_lab_test_deserialize_defaults() {
    let test: LabTest = serde_json::from_str(r#"{"name":"TSH"}"#).unwrap();
    assert_eq!(test.category, None);
    assert!(!test.abnormal);
}
