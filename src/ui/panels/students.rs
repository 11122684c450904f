use serde_json::{json, Value};

use crate::api::WriteMethod;
use crate::models::{Student, StudentPayload};
use crate::ui::confirm::PendingDelete;
use crate::ui::error::{err, ok};
use crate::ui::panels::{param_i64, param_str};
use crate::ui::tabs::Section;
use crate::ui::types::{Event, UiState};
use crate::view::{self, TableBody, TableView};

const LIST_PATH: &str = "/students/";

#[derive(Debug)]
pub struct StudentsPanel {
    pub table: TableBody,
    pub form: StudentForm,
}

impl Default for StudentsPanel {
    fn default() -> Self {
        Self {
            table: TableBody::Loading {
                message: "Loading students...".to_string(),
            },
            form: StudentForm::default(),
        }
    }
}

/// Raw field values as the form holds them; the hidden record id lives in
/// `edit_id` and decides create-vs-replace on submit.
#[derive(Debug, Default, Clone)]
pub struct StudentForm {
    pub edit_id: Option<i64>,
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: String,
}

fn form_view(form: &StudentForm) -> Value {
    json!({
        "editing": form.edit_id,
        "values": {
            "student_id": form.student_id,
            "first_name": form.first_name,
            "last_name": form.last_name,
            "email": form.email,
            "date_of_birth": form.date_of_birth,
        }
    })
}

fn table_view(state: &UiState) -> Value {
    json!(TableView {
        columns: view::student_columns(),
        body: state.students.table.clone(),
    })
}

fn fetch_all(state: &mut UiState) -> Result<Vec<Student>, String> {
    let items = state
        .backend
        .fetch_collection(LIST_PATH)
        .map_err(|e| e.to_string())?;
    items
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<Student>, _>>()
        .map_err(|e| e.to_string())
}

/// Fetch and re-render the whole table. A failed fetch renders a
/// distinguishable failed state instead of masquerading as an empty list.
pub fn reload(state: &mut UiState) -> Value {
    state.students.table = TableBody::Loading {
        message: "Loading students...".to_string(),
    };
    match fetch_all(state) {
        Ok(students) if students.is_empty() => {
            state.students.table = TableBody::Empty {
                message: "No students found. Add one above!".to_string(),
            };
        }
        Ok(students) => {
            state.students.table = TableBody::Rows {
                rows: students.iter().map(view::student_row).collect(),
            };
        }
        Err(e) => {
            state.notice.post(format!("Error fetching data: {e}"), true);
            state.students.table = TableBody::Failed {
                message: "Could not load students.".to_string(),
            };
        }
    }
    table_view(state)
}

pub fn reset_form(panel: &mut StudentsPanel) {
    panel.form = StudentForm::default();
}

fn handle_load(state: &mut UiState, ev: &Event) -> Value {
    let table = reload(state);
    ok(&ev.id, json!({ "section": "students", "table": table }))
}

fn handle_edit(state: &mut UiState, ev: &Event) -> Value {
    let Some(id) = param_i64(&ev.params, "id") else {
        return err(&ev.id, "bad_params", "missing params.id", None);
    };
    let record = state
        .backend
        .fetch_record(&format!("/students/{id}/"))
        .map_err(|e| e.to_string())
        .and_then(|v| serde_json::from_value::<Student>(v).map_err(|e| e.to_string()));
    match record {
        Ok(s) => {
            let form = &mut state.students.form;
            form.edit_id = Some(s.id);
            form.student_id = s.student_id.clone();
            form.first_name = s.first_name.clone();
            form.last_name = s.last_name.clone();
            form.email = s.email.clone();
            form.date_of_birth = s
                .date_of_birth
                .map(|d| d.to_string())
                .unwrap_or_default();
            state
                .notice
                .post(format!("Editing student: {}", s.full_name()), false);
            ok(&ev.id, json!({ "form": form_view(&state.students.form) }))
        }
        Err(e) => {
            // Form stays untouched; the user keeps whatever was there.
            state.notice.post(format!("Error fetching data: {e}"), true);
            err(&ev.id, "load_failed", e, None)
        }
    }
}

fn handle_submit(state: &mut UiState, ev: &Event) -> Value {
    let Some(student_id) = param_str(&ev.params, "student_id") else {
        return err(&ev.id, "bad_params", "missing params.student_id", None);
    };
    let Some(first_name) = param_str(&ev.params, "first_name") else {
        return err(&ev.id, "bad_params", "missing params.first_name", None);
    };
    let Some(last_name) = param_str(&ev.params, "last_name") else {
        return err(&ev.id, "bad_params", "missing params.last_name", None);
    };
    let Some(email) = param_str(&ev.params, "email") else {
        return err(&ev.id, "bad_params", "missing params.email", None);
    };
    let dob_raw = param_str(&ev.params, "date_of_birth").unwrap_or_default();

    // Keep the submitted values in the form so a failed save does not
    // wipe what the user typed.
    {
        let form = &mut state.students.form;
        form.student_id = student_id.clone();
        form.first_name = first_name.clone();
        form.last_name = last_name.clone();
        form.email = email.clone();
        form.date_of_birth = dob_raw.clone();
    }

    let date_of_birth = if dob_raw.trim().is_empty() {
        None
    } else {
        match dob_raw.trim().parse::<chrono::NaiveDate>() {
            Ok(d) => Some(d),
            Err(_) => {
                return err(
                    &ev.id,
                    "bad_params",
                    "date_of_birth must be YYYY-MM-DD",
                    None,
                )
            }
        }
    };

    let payload = json!(StudentPayload {
        student_id,
        first_name,
        last_name,
        email,
        date_of_birth,
    });

    let editing = state.students.form.edit_id;
    let result = match editing {
        Some(rid) => state.backend.submit_record(
            &format!("/students/{rid}/"),
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
                "Student updated successfully!"
            } else {
                "Student added successfully!"
            };
            state.notice.post(message, false);
            reset_form(&mut state.students);
            let table = reload(state);
            ok(
                &ev.id,
                json!({
                    "section": "students",
                    "table": table,
                    "form": form_view(&state.students.form),
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
        section: Section::Students,
        record_id: id,
    });
    ok(
        &ev.id,
        json!({ "confirm": { "visible": true, "section": "students", "recordId": id } }),
    )
}

fn handle_clear_form(state: &mut UiState, ev: &Event) -> Value {
    reset_form(&mut state.students);
    state.notice.post("Student form cleared.", false);
    ok(&ev.id, json!({ "form": form_view(&state.students.form) }))
}

pub fn try_handle(state: &mut UiState, ev: &Event) -> Option<Value> {
    match ev.method.as_str() {
        "students.load" => Some(handle_load(state, ev)),
        "students.edit" => Some(handle_edit(state, ev)),
        "students.submit" => Some(handle_submit(state, ev)),
        "students.remove" => Some(handle_remove(state, ev)),
        "students.clearForm" => Some(handle_clear_form(state, ev)),
        _ => None,
    }
}
