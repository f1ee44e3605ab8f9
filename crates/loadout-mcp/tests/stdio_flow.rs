use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Stdio};

use serde_json::{json, Value};

#[test]
fn loadout_rank_stdio_flow_works() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_loadoutd"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn loadoutd");

    let mut child_stdin = child.stdin.take().expect("stdin");
    let child_stdout = child.stdout.take().expect("stdout");
    let mut reader = BufReader::new(child_stdout);

    let req = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "tools/call",
        "params": {
            "name": "loadout_rank",
            "arguments": {"distance": 0, "ammo": 100}
        }
    });

    writeln!(child_stdin, "{}", req).expect("write request");
    drop(child_stdin);

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");

    let response: Value = serde_json::from_str(&line).expect("parse response json");
    let structured = &response["result"]["structuredContent"];
    assert_eq!(structured["recommendation"].as_str(), Some("pistol"));
    assert_eq!(structured["distance"].as_f64(), Some(1.0));

    let ranked = structured["ranking"]
        .as_array()
        .expect("ranking array")
        .iter()
        .filter_map(|entry| entry.get("candidate").and_then(Value::as_str))
        .collect::<Vec<_>>();
    assert_eq!(ranked, vec!["pistol", "rocket_launcher", "rifle"]);

    let status = child.wait().expect("wait child");
    assert!(status.success());
}

fn write_framed(stdin: &mut std::process::ChildStdin, payload: &Value) {
    let body = serde_json::to_vec(payload).expect("serialize payload");
    let frame = format!("Content-Length: {}\r\n\r\n", body.len());
    stdin
        .write_all(frame.as_bytes())
        .expect("write frame header");
    stdin.write_all(&body).expect("write frame body");
    stdin.flush().expect("flush frame");
}

fn read_framed(reader: &mut BufReader<std::process::ChildStdout>) -> Value {
    let mut content_length: Option<usize> = None;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).expect("read frame header");
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.is_empty() {
            break;
        }
        if let Some((name, value)) = trimmed.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse::<usize>().ok();
            }
        }
    }

    let len = content_length.expect("content-length header");
    let mut body = vec![0_u8; len];
    std::io::Read::read_exact(reader, &mut body).expect("read frame body");
    serde_json::from_slice(&body).expect("parse framed response")
}

#[test]
fn stdio_content_length_initialize_and_evaluate_work() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_loadoutd"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn loadoutd");

    let mut child_stdin = child.stdin.take().expect("stdin");
    let child_stdout = child.stdout.take().expect("stdout");
    let mut reader = BufReader::new(child_stdout);

    write_framed(
        &mut child_stdin,
        &json!({
            "jsonrpc":"2.0",
            "id":1,
            "method":"initialize",
            "params":{
                "protocolVersion":"2024-11-05",
                "capabilities":{},
                "clientInfo":{"name":"stdio-test","version":"1.0.0"}
            }
        }),
    );
    let init = read_framed(&mut reader);
    assert_eq!(
        init["result"]["protocolVersion"].as_str(),
        Some("2024-11-05")
    );

    write_framed(
        &mut child_stdin,
        &json!({
            "jsonrpc":"2.0",
            "id":2,
            "method":"tools/list",
            "params":{}
        }),
    );
    let tools = read_framed(&mut reader);
    let names = tools["result"]["tools"]
        .as_array()
        .expect("tools array")
        .iter()
        .filter_map(|tool| tool.get("name").and_then(Value::as_str))
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        vec![
            "loadout_rank",
            "loadout_evaluate",
            "loadout_sweep",
            "loadout_candidates"
        ]
    );

    write_framed(
        &mut child_stdin,
        &json!({
            "jsonrpc":"2.0",
            "id":3,
            "method":"tools/call",
            "params":{
                "name":"loadout_evaluate",
                "arguments":{"candidate":"rocket_launcher","distance":50,"ammo":50}
            }
        }),
    );
    let eval = read_framed(&mut reader);
    let score = eval["result"]["structuredContent"]["desirability"]
        .as_f64()
        .expect("desirability");
    assert!((score - 89.3333).abs() < 1e-3, "score {score}");
    assert_eq!(
        eval["result"]["structuredContent"]["band"].as_str(),
        Some("high")
    );

    drop(child_stdin);
    let status = child.wait().expect("wait child");
    assert!(status.success());
}

#[test]
fn oversized_frame_gets_parse_error_and_daemon_keeps_serving() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_loadoutd"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn loadoutd");

    let mut child_stdin = child.stdin.take().expect("stdin");
    let child_stdout = child.stdout.take().expect("stdout");
    let mut reader = BufReader::new(child_stdout);

    child_stdin
        .write_all(b"Content-Length: 99999999999999\r\n\r\n")
        .expect("write oversized header");
    child_stdin.flush().expect("flush");

    let rejected = read_framed(&mut reader);
    assert_eq!(rejected["error"]["code"].as_i64(), Some(-32700));
    assert!(rejected["id"].is_null());

    write_framed(
        &mut child_stdin,
        &json!({
            "jsonrpc":"2.0",
            "id":9,
            "method":"ping",
            "params":{}
        }),
    );
    let pong = read_framed(&mut reader);
    assert_eq!(pong["id"].as_i64(), Some(9));
    assert!(pong["result"].is_object());

    drop(child_stdin);
    let status = child.wait().expect("wait child");
    assert!(status.success());
}
