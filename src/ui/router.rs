use serde_json::{json, Value};

use crate::ui::error::{err, ok};
use crate::ui::panels;
use crate::ui::tabs::Section;
use crate::ui::types::{Event, UiState};

pub fn handle_event(state: &mut UiState, ev: Event) -> Value {
    let mut resp = dispatch(state, &ev);
    // Ride the visible banner along on every envelope so the host can
    // paint it without a separate poll.
    if let Some(obj) = resp.as_object_mut() {
        if let Some(n) = state.notice.current() {
            obj.insert("notice".to_string(), json!(n));
        }
    }
    resp
}

fn dispatch(state: &mut UiState, ev: &Event) -> Value {
    match ev.method.as_str() {
        "health" => return handle_health(state, ev),
        "tab.activate" => return handle_tab_activate(state, ev),
        "confirm.accept" => return handle_confirm_accept(state, ev),
        "confirm.cancel" => return handle_confirm_cancel(state, ev),
        _ => {}
    }
    if let Some(resp) = panels::students::try_handle(state, ev) {
        return resp;
    }
    if let Some(resp) = panels::subjects::try_handle(state, ev) {
        return resp;
    }
    if let Some(resp) = panels::grades::try_handle(state, ev) {
        return resp;
    }

    err(
        &ev.id,
        "not_implemented",
        format!("unknown method: {}", ev.method),
        None,
    )
}

fn handle_health(state: &mut UiState, ev: &Event) -> Value {
    ok(
        &ev.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "apiBase": state.api_base,
        }),
    )
}

fn handle_tab_activate(state: &mut UiState, ev: &Event) -> Value {
    let section = ev
        .params
        .get("section")
        .and_then(|v| v.as_str())
        .and_then(Section::parse);
    let Some(section) = section else {
        return err(&ev.id, "bad_params", "missing or unknown params.section", None);
    };

    state.active = section;
    // Activation always refetches; the rendered table is the only cache.
    let result = match section {
        Section::Students => {
            json!({ "section": "students", "table": panels::students::reload(state) })
        }
        Section::Subjects => {
            json!({ "section": "subjects", "table": panels::subjects::reload(state) })
        }
        Section::Grades => {
            let table = panels::grades::reload(state);
            panels::grades::populate_dropdowns(state);
            json!({
                "section": "grades",
                "table": table,
                "dropdowns": panels::grades::dropdowns_view(state),
            })
        }
    };
    ok(&ev.id, result)
}

fn handle_confirm_accept(state: &mut UiState, ev: &Event) -> Value {
    let Some(pending) = state.confirm.take() else {
        return err(&ev.id, "no_pending", "nothing awaiting confirmation", None);
    };

    let path = format!("/{}/{}/", pending.section.as_str(), pending.record_id);
    match state.backend.delete_record(&path) {
        Ok(()) => {
            state.notice.post("Item deleted successfully!", false);
            let table = match pending.section {
                Section::Students => panels::students::reload(state),
                Section::Subjects => panels::subjects::reload(state),
                Section::Grades => panels::grades::reload(state),
            };
            ok(
                &ev.id,
                json!({
                    "confirm": { "visible": false },
                    "section": pending.section,
                    "table": table,
                }),
            )
        }
        Err(e) => {
            // Modal already closed; the stale list stays until the next load.
            state.notice.post(format!("Error deleting item: {e}"), true);
            err(&ev.id, "delete_failed", e.to_string(), None)
        }
    }
}

fn handle_confirm_cancel(state: &mut UiState, ev: &Event) -> Value {
    state.confirm.cancel();
    ok(&ev.id, json!({ "confirm": { "visible": false } }))
}
