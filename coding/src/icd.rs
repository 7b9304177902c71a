use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const GENERAL_HEALTH_EXAM: &str = "Z00.00";

/// Diagnosis for an abnormal result of a specific test, keyed by lowercase test name.
pub(crate) static TEST_ICD: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("glucose", "R73.09"),
        ("fasting glucose", "R73.01"),
        ("hemoglobin a1c", "R73.09"),
        ("hba1c", "R73.09"),
        ("total cholesterol", "E78.00"),
        ("cholesterol", "E78.00"),
        ("ldl", "E78.00"),
        ("ldl cholesterol", "E78.00"),
        ("triglycerides", "E78.1"),
        ("tsh", "E07.9"),
        ("vitamin d", "E55.9"),
        ("25-hydroxy vitamin d", "E55.9"),
        ("vitamin b12", "E53.8"),
        ("ferritin", "E61.1"),
        ("iron", "E61.1"),
        ("hemoglobin", "D64.9"),
        ("psa", "R97.20"),
        ("crp", "R79.89"),
        ("hs-crp", "R79.89"),
        ("testosterone", "E29.1"),
    ])
});

/// Lowercase category -> diagnosis for abnormal results in that category.
pub(crate) static CATEGORY_ICD: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("metabolic", "E88.9"),
        ("diabetes", "R73.09"),
        ("lipids", "E78.5"),
        ("thyroid", "E07.9"),
        ("hematology", "D75.9"),
        ("vitamins", "E56.9"),
        ("liver", "R94.5"),
        ("kidney", "R94.4"),
        ("electrolytes", "E87.8"),
        ("hormones", "E34.9"),
        ("inflammation", "R79.89"),
        ("urinalysis", "R82.90"),
    ])
});

/// Lowercase category -> screening encounter code for a category that was tested
/// without an abnormal finding.
pub(crate) static SCREENING_ICD: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("metabolic", "Z13.228"),
        ("electrolytes", "Z13.228"),
        ("diabetes", "Z13.1"),
        ("lipids", "Z13.220"),
        ("thyroid", "Z13.29"),
        ("hormones", "Z13.29"),
        ("hematology", "Z13.0"),
        ("vitamins", "Z13.21"),
        ("liver", "Z13.89"),
        ("kidney", "Z13.89"),
        ("inflammation", "Z13.89"),
        ("urinalysis", "Z13.89"),
    ])
});

/// Category a test belongs to when the report does not label it.
pub(crate) static TEST_CATEGORY: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("glucose", "diabetes"),
        ("fasting glucose", "diabetes"),
        ("hemoglobin a1c", "diabetes"),
        ("hba1c", "diabetes"),
        ("total cholesterol", "lipids"),
        ("cholesterol", "lipids"),
        ("ldl", "lipids"),
        ("ldl cholesterol", "lipids"),
        ("triglycerides", "lipids"),
        ("tsh", "thyroid"),
        ("vitamin d", "vitamins"),
        ("25-hydroxy vitamin d", "vitamins"),
        ("vitamin b12", "vitamins"),
        ("ferritin", "hematology"),
        ("iron", "hematology"),
        ("hemoglobin", "hematology"),
        ("crp", "inflammation"),
        ("hs-crp", "inflammation"),
        ("testosterone", "hormones"),
        ("insulin", "diabetes"),
        ("hdl", "lipids"),
        ("hdl cholesterol", "lipids"),
        ("lipid panel", "lipids"),
        ("free t4", "thyroid"),
        ("free t3", "thyroid"),
        ("folate", "vitamins"),
        ("complete blood count", "hematology"),
        ("cbc", "hematology"),
        ("hematocrit", "hematology"),
        ("platelet count", "hematology"),
        ("creatinine", "kidney"),
        ("bun", "kidney"),
        ("blood urea nitrogen", "kidney"),
        ("alt", "liver"),
        ("ast", "liver"),
        ("alkaline phosphatase", "liver"),
        ("bilirubin", "liver"),
        ("albumin", "liver"),
        ("sodium", "electrolytes"),
        ("potassium", "electrolytes"),
        ("chloride", "electrolytes"),
        ("calcium", "electrolytes"),
        ("magnesium", "electrolytes"),
        ("cortisol", "hormones"),
        ("uric acid", "metabolic"),
        ("comprehensive metabolic panel", "metabolic"),
        ("basic metabolic panel", "metabolic"),
        ("urinalysis", "urinalysis"),
    ])
});

/// Category spellings seen on lab reports, folded onto the table keys.
const CATEGORY_ALIASES: &[(&str, &str)] = &[
    ("blood", "hematology"),
    ("cbc", "hematology"),
    ("hematologic", "hematology"),
    ("lipid", "lipids"),
    ("cholesterol", "lipids"),
    ("electrolyte", "electrolytes"),
    ("renal", "kidney"),
    ("kidney function", "kidney"),
    ("liver function", "liver"),
    ("hepatic", "liver"),
    ("vitamin", "vitamins"),
    ("hormone", "hormones"),
    ("glucose", "diabetes"),
    ("blood sugar", "diabetes"),
];

static ICD_DESCRIPTIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Z00.00", "Encounter for general adult medical examination without abnormal findings"),
        ("Z00.01", "Encounter for general adult medical examination with abnormal findings"),
        ("D64.9", "Anemia, unspecified"),
        ("D75.9", "Disease of blood and blood-forming organs, unspecified"),
        ("E07.9", "Disorder of thyroid, unspecified"),
        ("E29.1", "Testicular hypofunction"),
        ("E34.9", "Endocrine disorder, unspecified"),
        ("E53.8", "Deficiency of other specified B group vitamins"),
        ("E55.9", "Vitamin D deficiency, unspecified"),
        ("E56.9", "Vitamin deficiency, unspecified"),
        ("E61.1", "Iron deficiency"),
        ("E78.00", "Pure hypercholesterolemia, unspecified"),
        ("E78.1", "Pure hyperglyceridemia"),
        ("E78.5", "Hyperlipidemia, unspecified"),
        ("E87.8", "Other disorders of electrolyte and fluid balance"),
        ("E88.9", "Metabolic disorder, unspecified"),
        ("R73.01", "Impaired fasting glucose"),
        ("R73.09", "Other abnormal glucose"),
        ("R79.89", "Other specified abnormal findings of blood chemistry"),
        ("R82.90", "Unspecified abnormal findings in urine"),
        ("R94.4", "Abnormal results of kidney function studies"),
        ("R94.5", "Abnormal results of liver function studies"),
        ("R97.20", "Elevated prostate specific antigen [PSA]"),
        ("Z13.0", "Encounter for screening for diseases of the blood and blood-forming organs"),
        ("Z13.1", "Encounter for screening for diabetes mellitus"),
        ("Z13.21", "Encounter for screening for nutritional disorder"),
        ("Z13.220", "Encounter for screening for lipoid disorders"),
        ("Z13.228", "Encounter for screening for other metabolic disorders"),
        ("Z13.29", "Encounter for screening for other suspected endocrine disorder"),
        ("Z13.89", "Encounter for screening for other disorder"),
    ])
});

pub fn icd_description(code: &str) -> Option<&'static str> {
    ICD_DESCRIPTIONS.get(code.trim()).copied()
}

/// Lowercases and trims a category label and folds known aliases.
pub fn normalize_category(category: &str) -> String {
    let lowered = category.trim().to_lowercase();
    CATEGORY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(lowered)
}
