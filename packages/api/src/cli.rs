//! Command-line surface
//!
//! `tcprobe <host> <port> [--flag <value>]...`. Flags after the two
//! positionals are matched by exact name; unknown flags, flags without a
//! value and values that are not integers are skipped without complaint.

use std::io::Write;

use tcprobe_client::config::{OptionFlag, OptionSet};
use tcprobe_client::error::{self, Error};
use tcprobe_client::exchange::ShutdownSignal;

use crate::builder::ProbeBuilder;
use crate::display::StatusPrinter;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("missing <host> and <port>")]
    MissingTarget,
    #[error("invalid port: {0}")]
    InvalidPort(String),
}

impl From<ArgsError> for Error {
    fn from(err: ArgsError) -> Self {
        error::usage(err)
    }
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub host: String,
    pub port: u16,
    pub options: OptionSet,
}

impl Invocation {
    #[must_use]
    pub fn into_builder(self) -> ProbeBuilder {
        ProbeBuilder::new(self.host, self.port).options(self.options)
    }
}

/// Parse `args` as received from the OS, program name first.
///
/// # Errors
///
/// `MissingTarget` with fewer than two positionals, `InvalidPort` when the
/// port is not a number in `0..=65535`.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<Invocation, ArgsError> {
    let [_, host, port, flags @ ..] = args else {
        return Err(ArgsError::MissingTarget);
    };

    let port = port.as_ref();
    let port = port
        .parse::<u16>()
        .map_err(|_| ArgsError::InvalidPort(port.to_string()))?;

    Ok(Invocation {
        host: host.as_ref().to_string(),
        port,
        options: parse_flags(flags),
    })
}

fn parse_flags<S: AsRef<str>>(flags: &[S]) -> OptionSet {
    let mut options = OptionSet::new();
    let mut i = 0;

    while i < flags.len() {
        let Some(flag) = OptionFlag::from_name(flags[i].as_ref()) else {
            i += 1;
            continue;
        };
        let Some(value) = flags.get(i + 1) else {
            break;
        };

        match value.as_ref().trim().parse::<i64>() {
            Ok(raw) => {
                if !flag.accept(&mut options, raw) {
                    tracing::debug!(flag = flag.name(), raw, "value out of range, ignored");
                }
            }
            Err(_) => tracing::debug!(flag = flag.name(), value = value.as_ref(), "not an integer, ignored"),
        }
        i += 2;
    }

    options
}

/// Usage text for `prog`
#[must_use]
pub fn usage(prog: &str) -> String {
    let mut text = format!("Usage: {prog} <host> <port> [options]\n");
    text.push_str("\nRequired:\n");
    text.push_str("  <host>                Target IP address or hostname\n");
    text.push_str("  <port>                Target port number\n");
    text.push_str("\nSocket Options (all optional):\n");
    for flag in OptionFlag::ALL {
        let spec = format!("{} {}", flag.name(), flag.value_hint());
        text.push_str(&format!("  {spec:<26}{}\n", flag.description()));
    }
    text.push_str("\nNote: TCP_MAXRT sets max retransmission timeout (time-based), not retry count.\n");
    text.push_str("      On Linux it is applied as TCP_USER_TIMEOUT.\n");
    text
}

/// Exit status for a finished run
#[must_use]
pub fn exit_code<T>(result: &Result<T, Error>) -> u8 {
    match result {
        Err(err) if err.is_fatal() => EXIT_FAILURE,
        _ => EXIT_SUCCESS,
    }
}

/// Whole program minus process setup: parse, probe, print, pick an exit code.
pub fn run<S: AsRef<str>, W: Write>(
    args: &[S],
    shutdown: ShutdownSignal,
    printer: &mut StatusPrinter<W>,
) -> u8 {
    let invocation = match parse_args(args) {
        Ok(invocation) => invocation,
        Err(ArgsError::MissingTarget) => {
            let prog = args.first().map_or("tcprobe", |arg| arg.as_ref());
            printer.raw(&usage(prog));
            return exit_code::<()>(&Err(ArgsError::MissingTarget.into()));
        }
        Err(err) => {
            let err = Error::from(err);
            printer.fatal(&err);
            return exit_code::<()>(&Err(err));
        }
    };

    let result = invocation
        .into_builder()
        .shutdown_signal(shutdown)
        .run(printer);

    if let Err(err) = &result {
        printer.fatal(err);
    }

    exit_code(&result)
}
