use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use std::collections::HashMap;

pub const GENERAL_HEALTH_PANEL: &str = "80050";

/// Lowercase test name -> CPT code.
pub(crate) static TEST_CPT: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("glucose", "82947"),
        ("fasting glucose", "82947"),
        ("hemoglobin a1c", "83036"),
        ("hba1c", "83036"),
        ("insulin", "83525"),
        ("lipid panel", "80061"),
        ("total cholesterol", "82465"),
        ("cholesterol", "82465"),
        ("hdl", "83718"),
        ("hdl cholesterol", "83718"),
        ("ldl", "83721"),
        ("ldl cholesterol", "83721"),
        ("triglycerides", "84478"),
        ("tsh", "84443"),
        ("free t4", "84439"),
        ("free t3", "84481"),
        ("vitamin d", "82306"),
        ("25-hydroxy vitamin d", "82306"),
        ("vitamin b12", "82607"),
        ("folate", "82746"),
        ("ferritin", "82728"),
        ("iron", "83540"),
        ("complete blood count", "85025"),
        ("cbc", "85025"),
        ("hemoglobin", "85018"),
        ("hematocrit", "85014"),
        ("platelet count", "85049"),
        ("comprehensive metabolic panel", "80053"),
        ("cmp", "80053"),
        ("basic metabolic panel", "80048"),
        ("bmp", "80048"),
        ("creatinine", "82565"),
        ("bun", "84520"),
        ("blood urea nitrogen", "84520"),
        ("alt", "84460"),
        ("ast", "84450"),
        ("alkaline phosphatase", "84075"),
        ("bilirubin", "82247"),
        ("albumin", "82040"),
        ("sodium", "84295"),
        ("potassium", "84132"),
        ("chloride", "82435"),
        ("calcium", "82310"),
        ("magnesium", "83735"),
        ("uric acid", "84550"),
        ("psa", "84153"),
        ("crp", "86140"),
        ("hs-crp", "86141"),
        ("testosterone", "84403"),
        ("cortisol", "82533"),
        ("urinalysis", "81003"),
    ])
});

/// Panel codes added when a report spans several categories but no single test matched.
/// Every category listed for a rule must be present.
pub(crate) const PANEL_RULES: &[(&[&str], &str)] = &[
    (&["metabolic", "electrolytes"], "80053"),
    (&["lipids"], "80061"),
    (&["hematology"], "85025"),
    (&["thyroid"], "84443"),
    (&["liver"], "80076"),
    (&["kidney"], "80069"),
];

static CPT_DESCRIPTIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("80050", "General health panel"),
        ("80048", "Basic metabolic panel"),
        ("80053", "Comprehensive metabolic panel"),
        ("80061", "Lipid panel"),
        ("80069", "Renal function panel"),
        ("80076", "Hepatic function panel"),
        ("81003", "Urinalysis, automated, without microscopy"),
        ("82040", "Albumin; serum"),
        ("82247", "Bilirubin; total"),
        ("82306", "Vitamin D; 25 hydroxy"),
        ("82310", "Calcium; total"),
        ("82435", "Chloride; blood"),
        ("82465", "Cholesterol, serum, total"),
        ("82533", "Cortisol; total"),
        ("82565", "Creatinine; blood"),
        ("82607", "Cyanocobalamin (Vitamin B-12)"),
        ("82728", "Ferritin"),
        ("82746", "Folic acid; serum"),
        ("82947", "Glucose; quantitative, blood"),
        ("83036", "Hemoglobin; glycosylated (A1C)"),
        ("83525", "Insulin; total"),
        ("83540", "Iron"),
        ("83718", "Lipoprotein, direct measurement; HDL cholesterol"),
        ("83721", "Lipoprotein, direct measurement; LDL cholesterol"),
        ("83735", "Magnesium"),
        ("84075", "Phosphatase, alkaline"),
        ("84132", "Potassium; serum, plasma or whole blood"),
        ("84153", "Prostate specific antigen (PSA); total"),
        ("84295", "Sodium; serum, plasma or whole blood"),
        ("84403", "Testosterone; total"),
        ("84439", "Thyroxine; free"),
        ("84443", "Thyroid stimulating hormone (TSH)"),
        ("84450", "Transferase; aspartate amino (AST)"),
        ("84460", "Transferase; alanine amino (ALT)"),
        ("84478", "Triglycerides"),
        ("84481", "Triiodothyronine T3; free"),
        ("84520", "Urea nitrogen; quantitative"),
        ("84550", "Uric acid; blood"),
        ("85014", "Blood count; hematocrit"),
        ("85018", "Blood count; hemoglobin"),
        ("85025", "Complete blood count (CBC) with automated differential"),
        ("85049", "Blood count; platelet, automated"),
        ("86140", "C-reactive protein"),
        ("86141", "C-reactive protein; high sensitivity"),
    ])
});

/// Standard charges in cents.
static FEE_SCHEDULE: Lazy<HashMap<&'static str, i64>> = Lazy::new(|| {
    HashMap::from([
        ("80050", 25000),
        ("80048", 9500),
        ("80053", 15000),
        ("80061", 8500),
        ("80069", 9000),
        ("80076", 9000),
        ("82306", 12000),
        ("82607", 6500),
        ("82728", 5500),
        ("82947", 2500),
        ("83036", 4500),
        ("84443", 7500),
        ("84439", 6000),
        ("85025", 4550),
        ("86140", 4000),
        ("86141", 5000),
    ])
});

const DEFAULT_LAB_FEE_CENTS: i64 = 5000;

pub fn cpt_description(code: &str) -> Option<&'static str> {
    CPT_DESCRIPTIONS.get(code.trim()).copied()
}

/// Charge billed for one unit of a procedure; codes outside the schedule bill the default lab fee.
pub fn standard_charge(code: &str) -> Decimal {
    let cents = FEE_SCHEDULE
        .get(code.trim())
        .copied()
        .unwrap_or(DEFAULT_LAB_FEE_CENTS);
    Decimal::new(cents, 2)
}
