//! Record shapes as served by the REST backend.
//!
//! Grades come back with nested `student`/`subject` objects but are
//! written with flat `student_id`/`subject_id` references; both shapes
//! live here so the asymmetry is explicit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    /// Human-readable student code (unique, e.g. "S-1024"), distinct from
    /// the server row id.
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: Option<NaiveDate>,
    /// Server-assigned on create; absent from write payloads.
    #[serde(default)]
    pub enrollment_date: Option<NaiveDate>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Write payload for the students endpoint. Empty optional fields go out
/// as `null`, matching what the backend expects.
#[derive(Debug, Clone, Serialize)]
pub struct StudentPayload {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubjectPayload {
    pub name: String,
    pub code: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeType {
    Activity,
    Quiz,
    Exam,
}

impl GradeType {
    /// Display label ("exam" -> "Exam").
    pub fn label(self) -> &'static str {
        match self {
            GradeType::Activity => "Activity",
            GradeType::Quiz => "Quiz",
            GradeType::Exam => "Exam",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GradeType::Activity => "activity",
            GradeType::Quiz => "quiz",
            GradeType::Exam => "exam",
        }
    }

    pub fn parse(s: &str) -> Option<GradeType> {
        match s {
            "activity" => Some(GradeType::Activity),
            "quiz" => Some(GradeType::Quiz),
            "exam" => Some(GradeType::Exam),
            _ => None,
        }
    }
}

/// Read shape: the backend expands the student and subject references.
#[derive(Debug, Clone, Deserialize)]
pub struct Grade {
    pub id: i64,
    pub student: Student,
    pub subject: Subject,
    pub grade_type: GradeType,
    pub score: f64,
    pub notes: Option<String>,
    #[serde(default)]
    pub date_recorded: Option<NaiveDate>,
}

/// Write shape: flat id references only.
#[derive(Debug, Clone, Serialize)]
pub struct GradePayload {
    pub student_id: i64,
    pub subject_id: i64,
    pub grade_type: GradeType,
    pub score: f64,
    pub notes: String,
}
