use std::error::Error as StdError;
use std::io;

use super::helpers::TimedOut;
use super::types::{Error, Kind};

impl Error {
    /// Returns true if the error is from a malformed invocation.
    #[must_use]
    pub fn is_usage(&self) -> bool {
        matches!(self.inner.kind, Kind::Usage)
    }

    /// Returns true if the error is related to a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        if matches!(self.inner.kind, Kind::ConnectTimeout(_)) {
            return true;
        }

        let mut source = self.source();

        while let Some(err) = source {
            if err.is::<TimedOut>() {
                return true;
            }
            if let Some(io) = err.downcast_ref::<io::Error>() {
                if io.kind() == io::ErrorKind::TimedOut {
                    return true;
                }
            }
            source = err.source();
        }

        false
    }

    /// Returns true if the connect handshake failed (not a timeout)
    #[must_use]
    pub fn is_connect(&self) -> bool {
        matches!(self.inner.kind, Kind::Connect)
    }

    /// Returns true if the error is one per-option failure
    #[must_use]
    pub fn is_option_apply(&self) -> bool {
        matches!(self.inner.kind, Kind::OptionApply(_))
    }

    /// Returns true if the error ends the process with a failure status.
    ///
    /// Option failures are recovered locally and receive errors only end the
    /// session, so neither counts.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(self.inner.kind, Kind::OptionApply(_) | Kind::Io)
    }

    /// The platform error code behind this error, if one was captured.
    #[must_use]
    pub fn os_code(&self) -> Option<i32> {
        let mut source = self.source();

        while let Some(err) = source {
            if let Some(io) = err.downcast_ref::<io::Error>() {
                if let Some(code) = io.raw_os_error() {
                    return Some(code);
                }
            }
            source = err.source();
        }

        None
    }
}

/// Returns true for receive errors that should be retried rather than
/// ending the exchange.
#[must_use]
pub fn is_transient(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
    )
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::SocketOption;
    use crate::error;

    #[test]
    fn os_code_walks_source_chain() {
        let err = error::connect(io::Error::from_raw_os_error(111));
        assert_eq!(err.os_code(), Some(111));
        assert!(err.is_connect());
        assert!(err.is_fatal());
    }

    #[test]
    fn connect_timeout_is_timeout_not_connect() {
        let err = error::connect_timeout(Duration::from_millis(250));
        assert!(err.is_timeout());
        assert!(!err.is_connect());
        assert_eq!(err.to_string(), "connection timeout after 250ms");
    }

    #[test]
    fn timeout_diagnostic_names_duration_once() {
        let addr = "127.0.0.1:9".parse().unwrap();
        let err = error::connect_timeout(Duration::from_millis(400)).with_addr(addr);
        assert_eq!(err.to_string(), "connection timeout after 400ms (127.0.0.1:9)");
        assert!(err.is_timeout());
    }

    #[test]
    fn usage_errors_are_fatal() {
        let err = error::usage("invalid port: http");
        assert!(err.is_usage());
        assert!(err.is_fatal());
        assert_eq!(err.to_string(), "invalid invocation: invalid port: http");
    }

    #[test]
    fn option_failures_and_io_are_not_fatal() {
        let apply = error::option_apply(
            SocketOption::MaxSegment,
            io::Error::from(io::ErrorKind::InvalidInput),
        );
        assert!(apply.is_option_apply());
        assert!(!apply.is_fatal());
        assert!(!error::io(io::Error::from(io::ErrorKind::ConnectionReset)).is_fatal());
    }

    #[test]
    fn transient_kinds() {
        assert!(is_transient(&io::Error::from(io::ErrorKind::WouldBlock)));
        assert!(is_transient(&io::Error::from(io::ErrorKind::Interrupted)));
        assert!(!is_transient(&io::Error::from(io::ErrorKind::ConnectionReset)));
        assert!(!is_transient(&io::Error::from(io::ErrorKind::TimedOut)));
    }
}
