use serde::{Serialize, Deserialize};

/// A single test or biomarker read off a lab report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabTest {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub abnormal: bool,
}

impl LabTest {
    pub fn new(name: &str, category: Option<&str>) -> LabTest {
        LabTest {
            name: name.to_string(),
            category: category.map(str::to_string),
            abnormal: false,
        }
    }

    pub fn abnormal(mut self) -> LabTest {
        self.abnormal = true;
        self
    }
}
