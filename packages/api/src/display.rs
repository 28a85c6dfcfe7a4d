//! Human-readable status lines
//!
//! Every stage of a probe run reports through [`StatusPrinter`], which also
//! serves as the exchange loop observer. Output goes to any `Write`; the
//! binary uses stdout, tests use a `Vec<u8>`.

use std::io::{self, Write};

use tcprobe_client::connect::ApplyReport;
use tcprobe_client::error::Error;
use tcprobe_client::exchange::{ExchangeObserver, ExchangeOutcome};
use tcprobe_client::report::EffectiveOptions;

pub struct StatusPrinter<W> {
    out: W,
}

impl StatusPrinter<io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> StatusPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Status output is best effort; a closed stdout must not end the probe.
    pub fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
        let _ = self.out.flush();
    }

    pub fn raw(&mut self, text: &str) {
        let _ = self.out.write_all(text.as_bytes());
        let _ = self.out.flush();
    }

    pub fn socket_created(&mut self) {
        self.line("Socket created successfully");
    }

    pub fn apply_report(&mut self, report: &ApplyReport) {
        for outcome in &report.outcomes {
            self.line(&outcome.to_string());
        }
    }

    pub fn connecting(&mut self, host: &str, port: u16) {
        self.line(&format!("\nConnecting to {host}:{port}..."));
    }

    pub fn connected(&mut self) {
        self.line("Connected successfully!\n");
    }

    pub fn effective(&mut self, effective: &EffectiveOptions) {
        self.line("Current socket option values:");
        for line in effective.lines() {
            self.line(&format!("  {line}"));
        }
    }

    pub fn outcome(&mut self, outcome: &ExchangeOutcome) {
        self.line(&outcome.to_string());
    }

    pub fn closed(&mut self) {
        self.line("\nSocket closed successfully");
    }

    pub fn fatal(&mut self, err: &Error) {
        self.line(&err.to_string());
    }
}

impl<W: Write> ExchangeObserver for StatusPrinter<W> {
    fn received(&mut self, payload: &[u8]) {
        let text = String::from_utf8_lossy(payload);
        self.line(&format!("[recv] {} bytes: {text}", payload.len()));
    }

    fn sending(&mut self) {
        self.line("\nSending test HTTP request...");
    }

    fn sent(&mut self, result: &io::Result<usize>) {
        match result {
            Ok(n) => self.line(&format!("Sent {n} bytes")),
            Err(e) => match e.raw_os_error() {
                Some(code) => self.line(&format!("send() failed: {code}")),
                None => self.line(&format!("send() failed: {e}")),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn captured(f: impl FnOnce(&mut StatusPrinter<Vec<u8>>)) -> String {
        let mut printer = StatusPrinter::new(Vec::new());
        f(&mut printer);
        String::from_utf8(printer.into_inner()).unwrap()
    }

    #[test]
    fn exchange_lines() {
        let text = captured(|p| {
            p.received(b"hi");
            p.sending();
            p.sent(&Ok(18));
            p.sent(&Err(io::Error::from_raw_os_error(32)));
        });

        assert_eq!(
            text,
            "[recv] 2 bytes: hi\n\nSending test HTTP request...\nSent 18 bytes\nsend() failed: 32\n"
        );
    }

    #[test]
    fn peer_close_line() {
        let text = captured(|p| p.outcome(&ExchangeOutcome::PeerClosed));
        assert_eq!(text, "Connection closed by peer.\n");
    }
}
