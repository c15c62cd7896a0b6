//! Integration tests for the TCP line-protocol client against a fixture
//! bridge served from a background thread.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;

use vprobe_engine::{Engine, TcpEngine};

/// Serve one connection, answering each request line from the fixture table.
fn spawn_bridge() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind fixture bridge");
    let addr = listener.local_addr().unwrap().to_string();

    thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept");
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut writer = stream;
        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line).unwrap_or(0) == 0 {
                break;
            }
            let reply = match line.trim_end() {
                "buses" => "ok sourcebus,h1bus",
                "voltages h1bus" => "ok 7200 0 7100 -120",
                "basekv h1bus" => "ok 7.2",
                "tap Reg1" => "ok 5",
                "scaleload house1 3.5" => "ok",
                "cmd Solve" => "ok",
                "cmd RegControl.Reg1.Enabled=No" => "ok",
                "voltages ghostbus" => "err bus 'ghostbus' not found",
                "tap Broken" => "ok not-a-number",
                other => {
                    let _ = writeln!(writer, "err unhandled request '{other}'");
                    continue;
                }
            };
            writeln!(writer, "{reply}").unwrap();
        }
    });

    addr
}

#[test]
fn reads_telemetry_over_line_protocol() {
    let addr = spawn_bridge();
    let mut engine = TcpEngine::connect(&addr).unwrap();

    assert_eq!(
        engine.bus_names().unwrap(),
        vec!["sourcebus".to_string(), "h1bus".to_string()]
    );
    assert_eq!(
        engine.bus_voltages("h1bus").unwrap(),
        vec![7200.0, 0.0, 7100.0, -120.0]
    );
    assert_eq!(engine.bus_base_kv("h1bus").unwrap().value(), 7.2);
    assert_eq!(engine.regulator_tap("Reg1").unwrap(), 5);
}

#[test]
fn issues_commands_and_load_scaling() {
    let addr = spawn_bridge();
    let mut engine = TcpEngine::connect(&addr).unwrap();

    engine.solve().unwrap();
    engine.set_device_enabled("RegControl.Reg1", false).unwrap();
    engine.scale_load("house1", 3.5).unwrap();
}

#[test]
fn err_reply_surfaces_engine_diagnostic() {
    let addr = spawn_bridge();
    let mut engine = TcpEngine::connect(&addr).unwrap();

    let err = engine.bus_voltages("ghostbus").unwrap_err();
    assert!(err.to_string().contains("ghostbus"));
}

#[test]
fn non_numeric_telemetry_is_malformed() {
    let addr = spawn_bridge();
    let mut engine = TcpEngine::connect(&addr).unwrap();

    let err = engine.regulator_tap("Broken").unwrap_err();
    assert!(matches!(
        err,
        vprobe_core::VprobeError::MalformedTelemetry(_)
    ));
}

#[test]
fn unreachable_bridge_is_engine_unavailable() {
    // Port 9 (discard) is almost certainly closed; connect must fail fast.
    let err = TcpEngine::connect("127.0.0.1:9").unwrap_err();
    assert!(matches!(
        err,
        vprobe_core::VprobeError::EngineUnavailable(_)
    ));
}
