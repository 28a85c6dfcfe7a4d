use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

use tcprobe_client::config::OptionSet;
use tcprobe_client::connect::{ConnectionEstablisher, SocketHandle};
use tcprobe_client::exchange::{
    ExchangeLoop, ExchangeObserver, ExchangeOutcome, PROBE_PAYLOAD, ShutdownSignal,
};

enum Step {
    Data(Vec<u8>),
    Fail(io::ErrorKind),
    Eof,
}

/// Stream that replays scripted reads and records writes.
struct ScriptedStream {
    steps: VecDeque<Step>,
    reads: usize,
    written: Vec<u8>,
    fail_writes: bool,
    on_read: Option<ShutdownSignal>,
}

impl ScriptedStream {
    fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: steps.into(),
            reads: 0,
            written: Vec::new(),
            fail_writes: false,
            on_read: None,
        }
    }
}

impl Read for ScriptedStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads += 1;
        if let Some(signal) = &self.on_read {
            signal.trigger();
        }
        match self.steps.pop_front() {
            Some(Step::Data(data)) => {
                buf[..data.len()].copy_from_slice(&data);
                Ok(data.len())
            }
            Some(Step::Fail(kind)) => Err(io::Error::from(kind)),
            Some(Step::Eof) => Ok(0),
            None => panic!("read past end of script"),
        }
    }
}

impl Write for ScriptedStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.fail_writes {
            return Err(io::Error::from(io::ErrorKind::BrokenPipe));
        }
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Default)]
struct Recorder {
    received: Vec<Vec<u8>>,
    sends: Vec<Result<usize, io::ErrorKind>>,
    retries: usize,
}

impl ExchangeObserver for Recorder {
    fn received(&mut self, payload: &[u8]) {
        self.received.push(payload.to_vec());
    }

    fn sent(&mut self, result: &io::Result<usize>) {
        self.sends
            .push(result.as_ref().copied().map_err(io::Error::kind));
    }

    fn retrying(&mut self, _err: &io::Error) {
        self.retries += 1;
    }
}

#[test]
fn peer_sends_then_closes() {
    let shutdown = ShutdownSignal::new();
    let stream = ScriptedStream::new(vec![Step::Data(vec![7u8; 42]), Step::Eof]);
    let mut recorder = Recorder::default();

    let mut exchange = ExchangeLoop::new(stream, &shutdown);
    let outcome = exchange.run(&mut recorder);
    let stats = exchange.stats();
    let stream = exchange.into_inner();

    assert!(matches!(outcome, ExchangeOutcome::PeerClosed));
    assert_eq!(recorder.received, vec![vec![7u8; 42]]);
    assert_eq!(stream.written, PROBE_PAYLOAD);
    assert_eq!(recorder.sends, vec![Ok(PROBE_PAYLOAD.len())]);
    assert_eq!(stats.bytes_received, 42);
    assert_eq!(stats.probes_sent, 1);
    assert_eq!(stream.reads, 2);
}

#[test]
fn transient_errors_are_retried_without_probing() {
    let shutdown = ShutdownSignal::new();
    let stream = ScriptedStream::new(vec![
        Step::Fail(io::ErrorKind::WouldBlock),
        Step::Fail(io::ErrorKind::Interrupted),
        Step::Data(b"ok".to_vec()),
        Step::Eof,
    ]);
    let mut recorder = Recorder::default();

    let mut exchange = ExchangeLoop::new(stream, &shutdown);
    let outcome = exchange.run(&mut recorder);

    assert!(matches!(outcome, ExchangeOutcome::PeerClosed));
    assert_eq!(recorder.retries, 2);
    assert_eq!(recorder.sends.len(), 1);
    assert_eq!(exchange.stats().retries, 2);
}

#[test]
fn hard_receive_error_ends_loop() {
    let shutdown = ShutdownSignal::new();
    let stream = ScriptedStream::new(vec![
        Step::Data(b"x".to_vec()),
        Step::Fail(io::ErrorKind::ConnectionReset),
    ]);
    let mut recorder = Recorder::default();

    let outcome = ExchangeLoop::new(stream, &shutdown).run(&mut recorder);

    match outcome {
        ExchangeOutcome::Failed(err) => {
            assert_eq!(err.kind(), tcprobe_client::error::Kind::Io);
            assert!(!err.is_fatal());
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert_eq!(recorder.sends.len(), 1);
}

#[test]
fn send_errors_do_not_end_loop() {
    let shutdown = ShutdownSignal::new();
    let mut stream = ScriptedStream::new(vec![
        Step::Data(b"a".to_vec()),
        Step::Data(b"b".to_vec()),
        Step::Eof,
    ]);
    stream.fail_writes = true;
    let mut recorder = Recorder::default();

    let mut exchange = ExchangeLoop::new(stream, &shutdown);
    let outcome = exchange.run(&mut recorder);

    assert!(matches!(outcome, ExchangeOutcome::PeerClosed));
    assert_eq!(
        recorder.sends,
        vec![Err(io::ErrorKind::BrokenPipe), Err(io::ErrorKind::BrokenPipe)]
    );
    assert_eq!(exchange.stats().send_failures, 2);
}

#[test]
fn pre_set_signal_issues_no_receive() {
    let shutdown = ShutdownSignal::triggered();
    let mut exchange = ExchangeLoop::new(ScriptedStream::new(Vec::new()), &shutdown);

    let outcome = exchange.run(&mut Recorder::default());

    assert!(matches!(outcome, ExchangeOutcome::Cancelled));
    assert_eq!(exchange.into_inner().reads, 0);
}

#[test]
fn cancellation_during_receive_stops_after_it_returns() {
    let shutdown = ShutdownSignal::new();
    let mut stream = ScriptedStream::new(vec![Step::Data(b"still open".to_vec())]);
    stream.on_read = Some(shutdown.clone());
    let mut recorder = Recorder::default();

    let mut exchange = ExchangeLoop::new(stream, &shutdown);
    let outcome = exchange.run(&mut recorder);
    let stream = exchange.into_inner();

    assert!(matches!(outcome, ExchangeOutcome::Cancelled));
    assert_eq!(stream.reads, 1);
    assert_eq!(recorder.received.len(), 1);
    assert_eq!(stream.written, PROBE_PAYLOAD);
}

#[test]
fn loopback_peer_sends_then_closes() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let payload = b"220 probe target ready\r\n";

    let server = thread::spawn(move || {
        let (mut peer, _) = listener.accept().unwrap();
        peer.write_all(payload).unwrap();
        let mut probe = vec![0u8; PROBE_PAYLOAD.len()];
        peer.read_exact(&mut probe).unwrap();
        probe
    });

    let options = OptionSet::new().with_connect_timeout_ms(2_000);
    let handle = SocketHandle::create(addr).unwrap();
    let established = ConnectionEstablisher::new(&options)
        .establish(handle, addr)
        .unwrap();

    let shutdown = ShutdownSignal::new();
    let mut recorder = Recorder::default();
    let mut exchange = ExchangeLoop::new(established.handle, &shutdown);
    let outcome = exchange.run(&mut recorder);

    assert!(matches!(outcome, ExchangeOutcome::PeerClosed));
    assert_eq!(recorder.received.concat(), payload);
    assert_eq!(exchange.stats().probes_sent, recorder.received.len() as u64);
    assert_eq!(server.join().unwrap(), PROBE_PAYLOAD);
}

// Receive timeouts surface as WouldBlock on Unix, TimedOut on Windows.
#[cfg(unix)]
#[test]
fn loopback_cancellation_with_recv_timeout() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let server = thread::spawn(move || {
        let (peer, _): (TcpStream, _) = listener.accept().unwrap();
        thread::sleep(Duration::from_millis(500));
        drop(peer);
    });

    let options = OptionSet::new().with_recv_timeout_ms(20);
    let handle = SocketHandle::create(addr).unwrap();
    let established = ConnectionEstablisher::new(&options)
        .establish(handle, addr)
        .unwrap();

    let shutdown = ShutdownSignal::new();
    let trigger = shutdown.clone();
    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(100));
        trigger.trigger();
    });

    let mut recorder = Recorder::default();
    let outcome = ExchangeLoop::new(established.handle, &shutdown).run(&mut recorder);

    assert!(matches!(outcome, ExchangeOutcome::Cancelled));
    assert!(recorder.received.is_empty());
    assert!(recorder.retries > 0);
    canceller.join().unwrap();
    server.join().unwrap();
}
