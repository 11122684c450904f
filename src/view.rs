//! Pure render layer: records in, structured view nodes out.
//!
//! The hosting shell paints these as table rows and select options; nothing
//! here touches markup, so every render path is testable headlessly.

use serde::Serialize;

use crate::models::{Grade, Student, Subject};

/// One entity table as the host should paint it.
#[derive(Debug, Clone, Serialize)]
pub struct TableView {
    pub columns: Vec<&'static str>,
    pub body: TableBody,
}

/// Placeholder variants carry no row ids, so the host binds no edit/delete
/// actions for them. `Failed` is deliberately distinct from `Empty`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum TableBody {
    Loading { message: String },
    Empty { message: String },
    Failed { message: String },
    Rows { rows: Vec<RowView> },
}

#[derive(Debug, Clone, Serialize)]
pub struct RowView {
    /// Server row id; the host derives the edit/delete bindings from it.
    pub id: i64,
    pub cells: Vec<String>,
}

/// A dropdown rebuilt from a reference collection. `selected = None` means
/// the neutral placeholder option is showing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SelectView {
    pub placeholder: &'static str,
    pub options: Vec<OptionView>,
    pub selected: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionView {
    pub value: i64,
    pub label: String,
}

impl SelectView {
    pub fn rebuild(placeholder: &'static str, options: Vec<OptionView>) -> Self {
        Self {
            placeholder,
            options,
            selected: None,
        }
    }

    /// Select the option with the given value. Assigning a value that is
    /// not among the options leaves the placeholder selected, matching
    /// `<select>` semantics; callers must populate before assigning.
    pub fn select(&mut self, value: i64) {
        if self.options.iter().any(|o| o.value == value) {
            self.selected = Some(value);
        } else {
            self.selected = None;
        }
    }

    pub fn reset(&mut self) {
        self.selected = None;
    }
}

fn date_cell(d: Option<chrono::NaiveDate>) -> String {
    match d {
        Some(d) => d.format("%Y-%m-%d").to_string(),
        None => "N/A".to_string(),
    }
}

fn score_cell(score: f64) -> String {
    // 87.5 renders as "87.5", 90.0 as "90".
    format!("{}", score)
}

pub fn student_columns() -> Vec<&'static str> {
    vec!["Student ID", "Name", "Email", "Date of Birth", "Enrolled", "Actions"]
}

pub fn student_row(s: &Student) -> RowView {
    RowView {
        id: s.id,
        cells: vec![
            s.student_id.clone(),
            s.full_name(),
            s.email.clone(),
            date_cell(s.date_of_birth),
            date_cell(s.enrollment_date),
        ],
    }
}

pub fn subject_columns() -> Vec<&'static str> {
    vec!["Code", "Name", "Description", "Actions"]
}

pub fn subject_row(s: &Subject) -> RowView {
    RowView {
        id: s.id,
        cells: vec![
            s.code.clone(),
            s.name.clone(),
            s.description.clone().unwrap_or_else(|| "N/A".to_string()),
        ],
    }
}

pub fn grade_columns() -> Vec<&'static str> {
    vec!["Student", "Subject", "Type", "Score", "Recorded", "Actions"]
}

pub fn grade_row(g: &Grade) -> RowView {
    RowView {
        id: g.id,
        cells: vec![
            g.student.full_name(),
            format!("{} ({})", g.subject.name, g.subject.code),
            g.grade_type.label().to_string(),
            score_cell(g.score),
            date_cell(g.date_recorded),
        ],
    }
}

pub fn student_option(s: &Student) -> OptionView {
    OptionView {
        value: s.id,
        label: s.full_name(),
    }
}

pub fn subject_option(s: &Subject) -> OptionView {
    OptionView {
        value: s.id,
        label: format!("{} ({})", s.name, s.code),
    }
}
