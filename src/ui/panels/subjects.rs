use serde_json::{json, Value};

use crate::api::WriteMethod;
use crate::models::{Subject, SubjectPayload};
use crate::ui::confirm::PendingDelete;
use crate::ui::error::{err, ok};
use crate::ui::panels::{param_i64, param_str};
use crate::ui::tabs::Section;
use crate::ui::types::{Event, UiState};
use crate::view::{self, TableBody, TableView};

const LIST_PATH: &str = "/subjects/";

#[derive(Debug)]
pub struct SubjectsPanel {
    pub table: TableBody,
    pub form: SubjectForm,
}

impl Default for SubjectsPanel {
    fn default() -> Self {
        Self {
            table: TableBody::Loading {
                message: "Loading subjects...".to_string(),
            },
            form: SubjectForm::default(),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct SubjectForm {
    pub edit_id: Option<i64>,
    pub name: String,
    pub code: String,
    pub description: String,
}

fn form_view(form: &SubjectForm) -> Value {
    json!({
        "editing": form.edit_id,
        "values": {
            "name": form.name,
            "code": form.code,
            "description": form.description,
        }
    })
}

fn table_view(state: &UiState) -> Value {
    json!(TableView {
        columns: view::subject_columns(),
        body: state.subjects.table.clone(),
    })
}

fn fetch_all(state: &mut UiState) -> Result<Vec<Subject>, String> {
    let items = state
        .backend
        .fetch_collection(LIST_PATH)
        .map_err(|e| e.to_string())?;
    items
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<Subject>, _>>()
        .map_err(|e| e.to_string())
}

pub fn reload(state: &mut UiState) -> Value {
    state.subjects.table = TableBody::Loading {
        message: "Loading subjects...".to_string(),
    };
    match fetch_all(state) {
        Ok(subjects) if subjects.is_empty() => {
            state.subjects.table = TableBody::Empty {
                message: "No subjects found. Add one above!".to_string(),
            };
        }
        Ok(subjects) => {
            state.subjects.table = TableBody::Rows {
                rows: subjects.iter().map(view::subject_row).collect(),
            };
        }
        Err(e) => {
            state.notice.post(format!("Error fetching data: {e}"), true);
            state.subjects.table = TableBody::Failed {
                message: "Could not load subjects.".to_string(),
            };
        }
    }
    table_view(state)
}

pub fn reset_form(panel: &mut SubjectsPanel) {
    panel.form = SubjectForm::default();
}

fn handle_load(state: &mut UiState, ev: &Event) -> Value {
    let table = reload(state);
    ok(&ev.id, json!({ "section": "subjects", "table": table }))
}

fn handle_edit(state: &mut UiState, ev: &Event) -> Value {
    let Some(id) = param_i64(&ev.params, "id") else {
        return err(&ev.id, "bad_params", "missing params.id", None);
    };
    let record = state
        .backend
        .fetch_record(&format!("/subjects/{id}/"))
        .map_err(|e| e.to_string())
        .and_then(|v| serde_json::from_value::<Subject>(v).map_err(|e| e.to_string()));
    match record {
        Ok(s) => {
            let form = &mut state.subjects.form;
            form.edit_id = Some(s.id);
            form.name = s.name.clone();
            form.code = s.code.clone();
            form.description = s.description.clone().unwrap_or_default();
            state
                .notice
                .post(format!("Editing subject: {}", s.name), false);
            ok(&ev.id, json!({ "form": form_view(&state.subjects.form) }))
        }
        Err(e) => {
            state.notice.post(format!("Error fetching data: {e}"), true);
            err(&ev.id, "load_failed", e, None)
        }
    }
}

fn handle_submit(state: &mut UiState, ev: &Event) -> Value {
    let Some(name) = param_str(&ev.params, "name") else {
        return err(&ev.id, "bad_params", "missing params.name", None);
    };
    let Some(code) = param_str(&ev.params, "code") else {
        return err(&ev.id, "bad_params", "missing params.code", None);
    };
    let description = param_str(&ev.params, "description").unwrap_or_default();

    {
        let form = &mut state.subjects.form;
        form.name = name.clone();
        form.code = code.clone();
        form.description = description.clone();
    }

    let payload = json!(SubjectPayload {
        name,
        code,
        description: if description.trim().is_empty() {
            None
        } else {
            Some(description)
        },
    });

    let editing = state.subjects.form.edit_id;
    let result = match editing {
        Some(rid) => state.backend.submit_record(
            &format!("/subjects/{rid}/"),
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
                "Subject updated successfully!"
            } else {
                "Subject added successfully!"
            };
            state.notice.post(message, false);
            reset_form(&mut state.subjects);
            let table = reload(state);
            ok(
                &ev.id,
                json!({
                    "section": "subjects",
                    "table": table,
                    "form": form_view(&state.subjects.form),
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
        section: Section::Subjects,
        record_id: id,
    });
    ok(
        &ev.id,
        json!({ "confirm": { "visible": true, "section": "subjects", "recordId": id } }),
    )
}

fn handle_clear_form(state: &mut UiState, ev: &Event) -> Value {
    reset_form(&mut state.subjects);
    state.notice.post("Subject form cleared.", false);
    ok(&ev.id, json!({ "form": form_view(&state.subjects.form) }))
}

pub fn try_handle(state: &mut UiState, ev: &Event) -> Option<Value> {
    match ev.method.as_str() {
        "subjects.load" => Some(handle_load(state, ev)),
        "subjects.edit" => Some(handle_edit(state, ev)),
        "subjects.submit" => Some(handle_submit(state, ev)),
        "subjects.remove" => Some(handle_remove(state, ev)),
        "subjects.clearForm" => Some(handle_clear_form(state, ev)),
        _ => None,
    }
}
