use std::error::Error as StdError;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use crate::config::SocketOption;

/// A Result alias where the Err case is `tcprobe_client::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents errors that can occur while probing a TCP endpoint.
pub struct Error {
    pub inner: Box<Inner>,
}

pub struct Inner {
    pub kind: Kind,
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub addr: Option<SocketAddr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Malformed invocation
    Usage,
    /// Host/port could not be turned into an endpoint
    Resolve,
    /// The OS refused to create the socket
    SocketCreate,
    /// A single transport option could not be applied
    OptionApply(SocketOption),
    /// The bounded connect did not complete in time
    ConnectTimeout(Duration),
    /// The connect handshake failed
    Connect,
    /// Non-retryable receive error after the connection was up
    Io,
}

impl Error {
    #[must_use]
    pub fn new(kind: Kind) -> Error {
        Error {
            inner: Box::new(Inner {
                kind,
                source: None,
                addr: None,
            }),
        }
    }

    #[must_use = "Error builder methods return a new Error and should be used"]
    pub fn with<E: Into<Box<dyn StdError + Send + Sync>>>(mut self, source: E) -> Error {
        self.inner.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.inner.addr = Some(addr);
        self
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.inner.kind
    }

    /// Get the endpoint associated with this error, if any
    #[must_use]
    pub fn addr(&self) -> Option<SocketAddr> {
        self.inner.addr
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("tcprobe_client::Error");

        f.field("kind", &self.inner.kind);

        if let Some(ref source) = self.inner.source {
            f.field("source", source);
        }

        if let Some(ref addr) = self.inner.addr {
            f.field("addr", addr);
        }

        f.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.kind {
            Kind::Usage => f.write_str("invalid invocation")?,
            Kind::Resolve => f.write_str("address resolution failed")?,
            Kind::SocketCreate => f.write_str("socket() failed")?,
            Kind::OptionApply(option) => write!(f, "failed to set {option}")?,
            Kind::ConnectTimeout(after) => {
                write!(f, "connection timeout after {}ms", after.as_millis())?;
            }
            Kind::Connect => f.write_str("connect() failed")?,
            Kind::Io => f.write_str("recv() failed")?,
        }

        if let Some(addr) = self.inner.addr {
            write!(f, " ({addr})")?;
        }

        // A timeout's source only repeats the duration already printed.
        if matches!(self.inner.kind, Kind::ConnectTimeout(_)) {
            return Ok(());
        }

        if let Some(code) = self.os_code() {
            write!(f, ": {code}")?;
        } else if let Some(ref source) = self.inner.source {
            write!(f, ": {source}")?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}
