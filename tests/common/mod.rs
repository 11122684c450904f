#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::{json, Value};

use smsui::api::{ApiError, Backend, WriteMethod};
use smsui::ui::{Event, UiState};

/// One request as seen at the backend seam.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub method: String,
    pub path: String,
}

impl Call {
    pub fn new(method: &str, path: &str) -> Self {
        Self {
            method: method.to_string(),
            path: path.to_string(),
        }
    }
}

#[derive(Default)]
struct Shared {
    calls: Vec<Call>,
    write_bodies: Vec<Value>,
    collections: HashMap<String, Vec<Value>>,
    fail_paths: Vec<String>,
}

/// In-memory stand-in for the REST backend: serves seeded collections,
/// records every request, and fails on demand.
#[derive(Clone, Default)]
pub struct FakeBackend(Rc<RefCell<Shared>>);

impl FakeBackend {
    pub fn seed(&self, path: &str, records: Vec<Value>) {
        self.0
            .borrow_mut()
            .collections
            .insert(path.to_string(), records);
    }

    /// Make every request to `path` answer HTTP 500.
    pub fn fail(&self, path: &str) {
        self.0.borrow_mut().fail_paths.push(path.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().calls.clone()
    }

    pub fn write_bodies(&self) -> Vec<Value> {
        self.0.borrow().write_bodies.clone()
    }

    fn record(&self, method: &str, path: &str) -> Result<(), ApiError> {
        let mut shared = self.0.borrow_mut();
        shared.calls.push(Call::new(method, path));
        if shared.fail_paths.iter().any(|p| p == path) {
            return Err(ApiError::Status {
                status: 500,
                detail: "injected failure".to_string(),
            });
        }
        Ok(())
    }

    fn lookup(&self, path: &str) -> Result<Value, ApiError> {
        let parts: Vec<&str> = path.trim_matches('/').split('/').collect();
        if let [entity, id] = parts.as_slice() {
            let coll = format!("/{entity}/");
            if let Ok(id) = id.parse::<i64>() {
                let shared = self.0.borrow();
                if let Some(items) = shared.collections.get(&coll) {
                    if let Some(v) = items
                        .iter()
                        .find(|v| v.get("id").and_then(|i| i.as_i64()) == Some(id))
                    {
                        return Ok(v.clone());
                    }
                }
            }
        }
        Err(ApiError::Status {
            status: 404,
            detail: "not found".to_string(),
        })
    }
}

impl Backend for FakeBackend {
    fn fetch_collection(&self, path: &str) -> Result<Vec<Value>, ApiError> {
        self.record("GET", path)?;
        Ok(self
            .0
            .borrow()
            .collections
            .get(path)
            .cloned()
            .unwrap_or_default())
    }

    fn fetch_record(&self, path: &str) -> Result<Value, ApiError> {
        self.record("GET", path)?;
        self.lookup(path)
    }

    fn submit_record(
        &self,
        path: &str,
        method: WriteMethod,
        payload: &Value,
    ) -> Result<Value, ApiError> {
        self.record(method.http_name(), path)?;
        self.0.borrow_mut().write_bodies.push(payload.clone());
        let mut echoed = payload.clone();
        if let Some(obj) = echoed.as_object_mut() {
            obj.entry("id").or_insert(json!(999));
        }
        Ok(echoed)
    }

    fn delete_record(&self, path: &str) -> Result<(), ApiError> {
        self.record("DELETE", path)
    }
}

pub fn new_state() -> (FakeBackend, UiState) {
    let fake = FakeBackend::default();
    let state = UiState::new(Box::new(fake.clone()), "http://testserver/api".to_string());
    (fake, state)
}

pub fn ev(id: &str, method: &str, params: Value) -> Event {
    Event {
        id: id.to_string(),
        method: method.to_string(),
        params,
    }
}

// ---- fixtures ----

pub fn student_json(id: i64, code: &str, first: &str, last: &str, email: &str) -> Value {
    json!({
        "id": id,
        "student_id": code,
        "first_name": first,
        "last_name": last,
        "full_name": format!("{first} {last}"),
        "email": email,
        "date_of_birth": null,
        "enrollment_date": "2025-09-01"
    })
}

pub fn subject_json(id: i64, code: &str, name: &str) -> Value {
    json!({
        "id": id,
        "code": code,
        "name": name,
        "description": null
    })
}

pub fn grade_json(id: i64, student: Value, subject: Value, grade_type: &str, score: f64) -> Value {
    json!({
        "id": id,
        "student": student,
        "subject": subject,
        "grade_type": grade_type,
        "score": score,
        "notes": "",
        "date_recorded": "2026-03-01"
    })
}
