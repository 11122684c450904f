mod common;

use serde_json::json;

use common::{ev, new_state, subject_json, Call};
use smsui::ui::handle_event;

#[test]
fn remove_only_opens_the_gate_without_network() {
    let (fake, mut state) = new_state();

    let resp = handle_event(&mut state, ev("1", "students.remove", json!({ "id": 5 })));
    assert_eq!(resp["ok"], json!(true));
    assert_eq!(resp["result"]["confirm"]["visible"], json!(true));
    assert_eq!(resp["result"]["confirm"]["recordId"], json!(5));
    assert!(fake.calls().is_empty());
    assert!(state.confirm.is_open());
}

#[test]
fn cancel_guarantees_zero_network_calls() {
    let (fake, mut state) = new_state();

    handle_event(&mut state, ev("1", "students.remove", json!({ "id": 5 })));
    let resp = handle_event(&mut state, ev("2", "confirm.cancel", json!({})));
    assert_eq!(resp["result"]["confirm"]["visible"], json!(false));
    assert!(fake.calls().is_empty());

    // The discarded action cannot be confirmed afterwards.
    let resp = handle_event(&mut state, ev("3", "confirm.accept", json!({})));
    assert_eq!(resp["ok"], json!(false));
    assert_eq!(resp["error"]["code"], json!("no_pending"));
    assert!(fake.calls().is_empty());
}

#[test]
fn confirmed_delete_issues_one_delete_then_one_reload() {
    let (fake, mut state) = new_state();
    fake.seed("/students/", vec![]);

    handle_event(&mut state, ev("1", "students.remove", json!({ "id": 5 })));
    let resp = handle_event(&mut state, ev("2", "confirm.accept", json!({})));
    assert_eq!(resp["ok"], json!(true));
    assert_eq!(
        fake.calls(),
        vec![
            Call::new("DELETE", "/students/5/"),
            Call::new("GET", "/students/"),
        ]
    );
    assert_eq!(resp["notice"]["message"], json!("Item deleted successfully!"));

    // The pending slot is spent; accepting again is a no-op.
    let resp = handle_event(&mut state, ev("3", "confirm.accept", json!({})));
    assert_eq!(resp["error"]["code"], json!("no_pending"));
}

#[test]
fn failed_delete_skips_the_reload() {
    let (fake, mut state) = new_state();
    fake.fail("/grades/3/");

    handle_event(&mut state, ev("1", "grades.remove", json!({ "id": 3 })));
    let resp = handle_event(&mut state, ev("2", "confirm.accept", json!({})));
    assert_eq!(resp["ok"], json!(false));
    assert_eq!(resp["error"]["code"], json!("delete_failed"));
    assert_eq!(fake.calls(), vec![Call::new("DELETE", "/grades/3/")]);
    assert_eq!(resp["notice"]["isError"], json!(true));
}

#[test]
fn reopening_overwrites_the_pending_action() {
    let (fake, mut state) = new_state();
    fake.seed("/subjects/", vec![subject_json(9, "HIST10", "History")]);

    handle_event(&mut state, ev("1", "students.remove", json!({ "id": 1 })));
    handle_event(&mut state, ev("2", "subjects.remove", json!({ "id": 9 })));
    handle_event(&mut state, ev("3", "confirm.accept", json!({})));

    // Only the most recent action ran; the first was overwritten.
    let deletes: Vec<_> = fake
        .calls()
        .into_iter()
        .filter(|c| c.method == "DELETE")
        .collect();
    assert_eq!(deletes, vec![Call::new("DELETE", "/subjects/9/")]);
}
