//! Grades panel. On top of the usual list/edit/submit/remove lifecycle it
//! owns the two reference dropdowns (students, subjects). Rebuilding them
//! resets the selection, so population must happen before an edit assigns
//! the selected values; assigning a value with no matching option leaves
//! the placeholder showing.

use serde_json::{json, Value};

use crate::api::WriteMethod;
use crate::models::{Grade, GradePayload, GradeType, Student, Subject};
use crate::ui::confirm::PendingDelete;
use crate::ui::error::{err, ok};
use crate::ui::panels::{param_f64, param_i64, param_str};
use crate::ui::tabs::Section;
use crate::ui::types::{Event, UiState};
use crate::view::{self, SelectView, TableBody, TableView};

const LIST_PATH: &str = "/grades/";

#[derive(Debug)]
pub struct GradesPanel {
    pub table: TableBody,
    pub form: GradeForm,
    pub students_select: SelectView,
    pub subjects_select: SelectView,
}

impl Default for GradesPanel {
    fn default() -> Self {
        Self {
            table: TableBody::Loading {
                message: "Loading grades...".to_string(),
            },
            form: GradeForm::default(),
            students_select: SelectView::rebuild("Select Student", vec![]),
            subjects_select: SelectView::rebuild("Select Subject", vec![]),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct GradeForm {
    pub edit_id: Option<i64>,
    pub grade_type: String,
    pub score: String,
    pub notes: String,
}

fn form_view(state: &UiState) -> Value {
    let form = &state.grades.form;
    json!({
        "editing": form.edit_id,
        "values": {
            "grade_type": form.grade_type,
            "score": form.score,
            "notes": form.notes,
        },
        "students": state.grades.students_select,
        "subjects": state.grades.subjects_select,
    })
}

pub fn dropdowns_view(state: &UiState) -> Value {
    json!({
        "students": state.grades.students_select,
        "subjects": state.grades.subjects_select,
    })
}

fn table_view(state: &UiState) -> Value {
    json!(TableView {
        columns: view::grade_columns(),
        body: state.grades.table.clone(),
    })
}

fn fetch_all(state: &mut UiState) -> Result<Vec<Grade>, String> {
    let items = state
        .backend
        .fetch_collection(LIST_PATH)
        .map_err(|e| e.to_string())?;
    items
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<Grade>, _>>()
        .map_err(|e| e.to_string())
}

pub fn reload(state: &mut UiState) -> Value {
    state.grades.table = TableBody::Loading {
        message: "Loading grades...".to_string(),
    };
    match fetch_all(state) {
        Ok(grades) if grades.is_empty() => {
            state.grades.table = TableBody::Empty {
                message: "No grades found. Add one above!".to_string(),
            };
        }
        Ok(grades) => {
            state.grades.table = TableBody::Rows {
                rows: grades.iter().map(view::grade_row).collect(),
            };
        }
        Err(e) => {
            state.notice.post(format!("Error fetching data: {e}"), true);
            state.grades.table = TableBody::Failed {
                message: "Could not load grades.".to_string(),
            };
        }
    }
    table_view(state)
}

/// Rebuild both reference dropdowns from the backend. A failed fetch
/// degrades that list to placeholder-only, with a notice.
pub fn populate_dropdowns(state: &mut UiState) {
    let students = state
        .backend
        .fetch_collection("/students/")
        .map_err(|e| e.to_string())
        .and_then(|items| {
            items
                .into_iter()
                .map(serde_json::from_value::<Student>)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| e.to_string())
        });
    let options = match students {
        Ok(students) => students.iter().map(view::student_option).collect(),
        Err(e) => {
            state.notice.post(format!("Error fetching data: {e}"), true);
            vec![]
        }
    };
    state.grades.students_select = SelectView::rebuild("Select Student", options);

    let subjects = state
        .backend
        .fetch_collection("/subjects/")
        .map_err(|e| e.to_string())
        .and_then(|items| {
            items
                .into_iter()
                .map(serde_json::from_value::<Subject>)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| e.to_string())
        });
    let options = match subjects {
        Ok(subjects) => subjects.iter().map(view::subject_option).collect(),
        Err(e) => {
            state.notice.post(format!("Error fetching data: {e}"), true);
            vec![]
        }
    };
    state.grades.subjects_select = SelectView::rebuild("Select Subject", options);
}

pub fn reset_form(panel: &mut GradesPanel) {
    panel.form = GradeForm::default();
    panel.students_select.reset();
    panel.subjects_select.reset();
}

fn handle_load(state: &mut UiState, ev: &Event) -> Value {
    let table = reload(state);
    ok(&ev.id, json!({ "section": "grades", "table": table }))
}

fn handle_dropdowns(state: &mut UiState, ev: &Event) -> Value {
    populate_dropdowns(state);
    ok(&ev.id, json!({ "dropdowns": dropdowns_view(state) }))
}

fn handle_edit(state: &mut UiState, ev: &Event) -> Value {
    let Some(id) = param_i64(&ev.params, "id") else {
        return err(&ev.id, "bad_params", "missing params.id", None);
    };
    let record = state
        .backend
        .fetch_record(&format!("/grades/{id}/"))
        .map_err(|e| e.to_string())
        .and_then(|v| serde_json::from_value::<Grade>(v).map_err(|e| e.to_string()));
    match record {
        Ok(g) => {
            // Dropdowns must be rebuilt before the selections are
            // assigned, or the assignment falls back to the placeholder.
            populate_dropdowns(state);
            state.grades.students_select.select(g.student.id);
            state.grades.subjects_select.select(g.subject.id);

            let form = &mut state.grades.form;
            form.edit_id = Some(g.id);
            form.grade_type = g.grade_type.as_str().to_string();
            form.score = format!("{}", g.score);
            form.notes = g.notes.clone().unwrap_or_default();
            state.notice.post(
                format!(
                    "Editing grade for {} in {}",
                    g.student.full_name(),
                    g.subject.name
                ),
                false,
            );
            ok(&ev.id, json!({ "form": form_view(state) }))
        }
        Err(e) => {
            state.notice.post(format!("Error fetching data: {e}"), true);
            err(&ev.id, "load_failed", e, None)
        }
    }
}

fn handle_submit(state: &mut UiState, ev: &Event) -> Value {
    let Some(student_id) = param_i64(&ev.params, "student_id") else {
        return err(&ev.id, "bad_params", "select a student", None);
    };
    let Some(subject_id) = param_i64(&ev.params, "subject_id") else {
        return err(&ev.id, "bad_params", "select a subject", None);
    };
    let Some(grade_type) =
        param_str(&ev.params, "grade_type").and_then(|s| GradeType::parse(&s))
    else {
        return err(&ev.id, "bad_params", "unknown grade_type", None);
    };
    let Some(score) = param_f64(&ev.params, "score") else {
        return err(&ev.id, "bad_params", "score must be a number", None);
    };
    let notes = param_str(&ev.params, "notes").unwrap_or_default();

    {
        state.grades.students_select.select(student_id);
        state.grades.subjects_select.select(subject_id);
        let form = &mut state.grades.form;
        form.grade_type = grade_type.as_str().to_string();
        form.score = format!("{}", score);
        form.notes = notes.clone();
    }

    let payload = json!(GradePayload {
        student_id,
        subject_id,
        grade_type,
        score,
        notes,
    });

    let editing = state.grades.form.edit_id;
    let result = match editing {
        Some(rid) => state.backend.submit_record(
            &format!("/grades/{rid}/"),
            WriteMethod::Replace,
            &payload,
        ),
        None => state
            .backend
            .submit_record(LIST_PATH, WriteMethod::Create, &payload),
    };

    match result {
        Ok(_) => {
            let message = if editing.is_some() {
                "Grade updated successfully!"
            } else {
                "Grade added successfully!"
            };
            state.notice.post(message, false);
            reset_form(&mut state.grades);
            let table = reload(state);
            ok(
                &ev.id,
                json!({
                    "section": "grades",
                    "table": table,
                    "form": form_view(state),
                }),
            )
        }
        Err(e) => {
            state.notice.post(format!("Error saving data: {e}"), true);
            err(&ev.id, "save_failed", e.to_string(), None)
        }
    }
}

fn handle_remove(state: &mut UiState, ev: &Event) -> Value {
    let Some(id) = param_i64(&ev.params, "id") else {
        return err(&ev.id, "bad_params", "missing params.id", None);
    };
    state.confirm.open(PendingDelete {
        section: Section::Grades,
        record_id: id,
    });
    ok(
        &ev.id,
        json!({ "confirm": { "visible": true, "section": "grades", "recordId": id } }),
    )
}

fn handle_clear_form(state: &mut UiState, ev: &Event) -> Value {
    reset_form(&mut state.grades);
    state.notice.post("Grade form cleared.", false);
    ok(&ev.id, json!({ "form": form_view(state) }))
}

pub fn try_handle(state: &mut UiState, ev: &Event) -> Option<Value> {
    match ev.method.as_str() {
        "grades.load" => Some(handle_load(state, ev)),
        "grades.dropdowns" => Some(handle_dropdowns(state, ev)),
        "grades.edit" => Some(handle_edit(state, ev)),
        "grades.submit" => Some(handle_submit(state, ev)),
        "grades.remove" => Some(handle_remove(state, ev)),
        "grades.clearForm" => Some(handle_clear_form(state, ev)),
        _ => None,
    }
}
