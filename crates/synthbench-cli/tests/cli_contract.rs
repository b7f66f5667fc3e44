// SPDX-License-Identifier: Apache-2.0

use assert_cmd::Command;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tempfile::tempdir;
use tiny_http::{Response, Server, StatusCode};

fn bin() -> Command {
    Command::cargo_bin("synthbench").expect("synthbench binary")
}

struct ObjectServer {
    base: String,
    stop: Arc<AtomicBool>,
    handle: thread::JoinHandle<()>,
}

impl ObjectServer {
    fn spawn(objects: HashMap<String, String>) -> Self {
        let server = Server::http("127.0.0.1:0").expect("http server");
        let base = format!("http://{}", server.server_addr());
        let stop = Arc::new(AtomicBool::new(false));
        let stop_in_server = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            while !stop_in_server.load(Ordering::Relaxed) {
                let request = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(request)) => request,
                    Ok(None) => continue,
                    Err(_) => break,
                };
                match objects.get(request.url()) {
                    Some(body) => {
                        let _ = request.respond(Response::from_data(body.as_bytes().to_vec()));
                    }
                    None => {
                        let _ = request.respond(Response::empty(StatusCode(404)));
                    }
                }
            }
        });
        Self { base, stop, handle }
    }

    fn shutdown(self) {
        self.stop.store(true, Ordering::Relaxed);
        self.handle.join().expect("server thread");
    }
}

fn gcd_objects() -> HashMap<String, String> {
    let edge = (0..6)
        .map(|i| format!("{{\"input1\": {}, \"input2\": 1, \"output1\": 1}}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");
    let random = (0..10)
        .map(|i| format!("{{\"input1\": {}, \"input2\": 12, \"output1\": 4}}", 12 * i + 8))
        .collect::<Vec<_>>()
        .join("\n");
    HashMap::from([
        (
            "/psb2-datasets/PSB2/datasets/gcd/gcd-edge.json".to_string(),
            edge,
        ),
        (
            "/psb2-datasets/PSB2/datasets/gcd/gcd-random.json".to_string(),
            random,
        ),
    ])
}

#[test]
fn catalog_list_enumerates_both_suites() {
    let output = bin()
        .args(["catalog", "list"])
        .output()
        .expect("catalog list");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().any(|line| line == "gcd"));
    assert!(stdout.lines().any(|line| line == "replace-space-with-newline"));
}

#[test]
fn catalog_list_group_filter_restricts_to_one_suite() {
    let output = bin()
        .args(["catalog", "list", "--group", "psb1"])
        .output()
        .expect("catalog list psb1");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().any(|line| line == "median"));
    assert!(!stdout.lines().any(|line| line == "gcd"));
}

#[test]
fn download_places_dataset_files() {
    let server = ObjectServer::spawn(gcd_objects());
    let out = tempdir().expect("out dir");

    let output = bin()
        .args(["download", "--endpoint", &server.base])
        .arg("--out")
        .arg(out.path())
        .arg("gcd")
        .output()
        .expect("download");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    assert!(out.path().join("gcd/gcd-edge.json").exists());
    assert!(out.path().join("gcd/gcd-random.json").exists());
    server.shutdown();
}

#[test]
fn read_prints_a_summary_line() {
    let server = ObjectServer::spawn(gcd_objects());
    let cache = tempdir().expect("cache dir");

    let output = bin()
        .args(["read", "--dataset", "gcd", "--endpoint", &server.base])
        .arg("--cache-dir")
        .arg(cache.path())
        .env_remove("SYNTHBENCH_CACHE_DIR")
        .output()
        .expect("read");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("dataset=gcd"), "got: {stdout}");
    assert!(stdout.contains("rows=16"), "got: {stdout}");
    assert!(stdout.contains("edge_rows=6"), "got: {stdout}");
    assert!(
        stdout.contains("columns=input1,input2,output,edge_case"),
        "got: {stdout}"
    );
    server.shutdown();
}

#[test]
fn read_json_emits_one_object_per_row() {
    let server = ObjectServer::spawn(gcd_objects());
    let cache = tempdir().expect("cache dir");

    let output = bin()
        .args(["read", "--dataset", "gcd", "--json", "--endpoint", &server.base])
        .arg("--cache-dir")
        .arg(cache.path())
        .env_remove("SYNTHBENCH_CACHE_DIR")
        .output()
        .expect("read --json");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let rows: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("row is JSON"))
        .collect();
    assert_eq!(rows.len(), 16);
    assert!(rows[0].get("edge_case").is_some());
    server.shutdown();
}

#[test]
fn invalid_dataset_names_are_usage_errors() {
    let output = bin()
        .args(["read", "--dataset", "NOT_A_NAME"])
        .output()
        .expect("read invalid");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid dataset name"), "got: {stderr}");
}

#[test]
fn download_without_names_or_all_is_a_usage_error() {
    let out = tempdir().expect("out dir");
    let output = bin()
        .arg("download")
        .arg("--out")
        .arg(out.path())
        .output()
        .expect("download without names");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn missing_command_is_a_usage_error() {
    let output = bin().output().expect("bare invocation");
    assert_eq!(output.status.code(), Some(2));
}
