use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use serde_json::json;

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_smsui");
    // Nothing listens on port 9; every HTTP call fails fast, which is
    // exactly what this smoke test wants to exercise.
    let mut child = Command::new(exe)
        .args(["--api-base", "http://127.0.0.1:9/api", "--csrf-token", "smoke"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn smsui");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    assert!(!line.trim().is_empty(), "empty response for {}", method);
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

#[test]
fn router_dispatch_smoke_with_unreachable_backend() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let health = request(&mut stdin, &mut reader, "1", "health", json!({}));
    assert_eq!(health["ok"], json!(true));
    assert_eq!(
        health["result"]["apiBase"],
        json!("http://127.0.0.1:9/api")
    );
    assert!(health["result"]["version"].is_string());

    // Tab activation still answers; the unreachable backend surfaces as a
    // failed table plus an error notice, never as an empty list.
    let activated = request(
        &mut stdin,
        &mut reader,
        "2",
        "tab.activate",
        json!({ "section": "students" }),
    );
    assert_eq!(activated["ok"], json!(true));
    assert_eq!(
        activated["result"]["table"]["body"]["state"],
        json!("failed")
    );
    assert_eq!(activated["notice"]["isError"], json!(true));

    let cleared = request(&mut stdin, &mut reader, "3", "students.clearForm", json!({}));
    assert_eq!(cleared["ok"], json!(true));
    assert_eq!(cleared["result"]["form"]["editing"], json!(null));

    // Remove + cancel stays entirely local.
    let removed = request(
        &mut stdin,
        &mut reader,
        "4",
        "students.remove",
        json!({ "id": 5 }),
    );
    assert_eq!(removed["result"]["confirm"]["visible"], json!(true));
    let cancelled = request(&mut stdin, &mut reader, "5", "confirm.cancel", json!({}));
    assert_eq!(cancelled["result"]["confirm"]["visible"], json!(false));

    let unknown = request(&mut stdin, &mut reader, "6", "papers.load", json!({}));
    assert_eq!(unknown["ok"], json!(false));
    assert_eq!(unknown["error"]["code"], json!("not_implemented"));

    // A line that is not JSON gets a bad_json envelope without an id.
    writeln!(stdin, "not json").expect("write garbage");
    stdin.flush().expect("flush garbage");
    let mut line = String::new();
    reader.read_line(&mut line).expect("read bad_json response");
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse");
    assert_eq!(value["ok"], json!(false));
    assert_eq!(value["error"]["code"], json!("bad_json"));

    drop(stdin);
    let _ = child.wait();
}
