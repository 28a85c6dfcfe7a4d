use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::thread;
use std::time::Duration;

use tcprobe::cli::{self, EXIT_FAILURE, EXIT_SUCCESS};
use tcprobe::{ExchangeOutcome, ShutdownSignal, StatusPrinter, Tcprobe};

fn invoke(args: &[&str]) -> (u8, String) {
    let mut printer = StatusPrinter::new(Vec::new());
    let code = cli::run(args, ShutdownSignal::new(), &mut printer);
    (code, String::from_utf8(printer.into_inner()).unwrap())
}

/// Peer that sends a greeting, reads the probe, then closes.
fn greeting_server(greeting: &'static [u8]) -> (SocketAddr, thread::JoinHandle<Vec<u8>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let server = thread::spawn(move || {
        let (mut peer, _) = listener.accept().unwrap();
        peer.write_all(greeting).unwrap();

        let mut probe = vec![0u8; tcprobe_client::exchange::PROBE_PAYLOAD.len()];
        peer.read_exact(&mut probe).unwrap();
        probe
    });

    (addr, server)
}

#[test]
fn missing_positionals_print_usage() {
    let (code, output) = invoke(&["tcprobe", "127.0.0.1"]);

    assert_eq!(code, EXIT_FAILURE);
    assert!(output.starts_with("Usage: tcprobe <host> <port>"));
    assert!(!output.contains("Socket created"));
}

#[test]
fn bad_port_is_a_usage_failure() {
    let (code, output) = invoke(&["tcprobe", "127.0.0.1", "eighty"]);

    assert_eq!(code, EXIT_FAILURE);
    assert!(output.contains("invalid invocation: invalid port: eighty"));
}

#[test]
fn full_run_against_loopback_peer() {
    let (addr, server) = greeting_server(b"hello");
    let port = addr.port().to_string();

    let (code, output) = invoke(&[
        "tcprobe",
        "127.0.0.1",
        &port,
        "--nodelay",
        "1",
        "--linger",
        "-1",
        "--bogus",
        "7",
    ]);

    assert_eq!(code, EXIT_SUCCESS);
    assert_eq!(server.join().unwrap(), b"GET / HTTP/1.0\r\n\r\n");

    let connecting = format!("Connecting to 127.0.0.1:{port}...");
    let expected: [&str; 11] = [
        "Socket created successfully",
        "Set TCP_NODELAY = 1",
        &connecting,
        "Connected successfully!",
        "Current socket option values:",
        "  SO_LINGER: disabled (linger=0 sec)",
        "[recv] 5 bytes: hello",
        "Sending test HTTP request...",
        "Sent 18 bytes",
        "Connection closed by peer.",
        "Socket closed successfully",
    ];

    let mut rest = output.as_str();
    for line in expected {
        let at = rest
            .find(line)
            .unwrap_or_else(|| panic!("{line:?} missing or out of order in:\n{output}"));
        rest = &rest[at + line.len()..];
    }
}

#[test]
fn refused_connect_exits_with_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port().to_string();
    drop(listener);

    let (code, output) = invoke(&["tcprobe", "127.0.0.1", &port, "--connect-timeout", "1000"]);

    assert_eq!(code, EXIT_FAILURE);
    assert!(output.contains("Socket created successfully"));
    assert!(output.contains("connect() failed"));
    assert!(!output.contains("Connected successfully!"));
}

#[test]
fn builder_run_reports_summary() {
    let (addr, server) = greeting_server(b"abc");

    let mut printer = StatusPrinter::new(Vec::new());
    let summary = Tcprobe::target("127.0.0.1", addr.port())
        .keepalive(true)
        .recv_timeout(Duration::from_secs(5))
        .run(&mut printer)
        .unwrap();

    server.join().unwrap();

    assert_eq!(summary.peer, addr);
    assert!(summary.report.is_clean());
    assert_eq!(summary.effective.keepalive, Some(true));
    assert!(matches!(summary.outcome, ExchangeOutcome::PeerClosed));
    assert_eq!(summary.stats.bytes_received, 3);
    assert_eq!(summary.stats.probes_sent, 1);
}

#[test]
fn pre_triggered_signal_skips_the_exchange() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let mut printer = StatusPrinter::new(Vec::new());
    let summary = Tcprobe::target("127.0.0.1", addr.port())
        .shutdown_signal(ShutdownSignal::triggered())
        .run(&mut printer)
        .unwrap();

    assert!(matches!(summary.outcome, ExchangeOutcome::Cancelled));
    assert_eq!(summary.stats.receives, 0);
    drop(listener);
}
