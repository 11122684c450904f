use serde::Serialize;

/// Exactly one section is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Students,
    Subjects,
    Grades,
}

impl Section {
    pub fn as_str(self) -> &'static str {
        match self {
            Section::Students => "students",
            Section::Subjects => "subjects",
            Section::Grades => "grades",
        }
    }

    pub fn parse(s: &str) -> Option<Section> {
        match s {
            "students" => Some(Section::Students),
            "subjects" => Some(Section::Subjects),
            "grades" => Some(Section::Grades),
            _ => None,
        }
    }
}
