use std::time::Duration;

use super::helpers::TimedOut;
use super::types::{Error, Kind};
use crate::config::SocketOption;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Creates an `Error` for a malformed invocation.
pub fn usage<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Usage).with(e.into())
}

/// Creates an `Error` for a resolution failure.
pub fn resolve<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Resolve).with(e.into())
}

/// Creates an `Error` for a socket creation failure.
pub fn socket_create<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::SocketCreate).with(e.into())
}

/// Creates an `Error` for a single option that could not be applied.
pub fn option_apply<E: Into<BoxError>>(option: SocketOption, e: E) -> Error {
    Error::new(Kind::OptionApply(option)).with(e.into())
}

/// Creates an `Error` for a connect that failed outright.
pub fn connect<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Connect).with(e.into())
}

/// Creates an `Error` for a connect that did not finish within `after`.
pub fn connect_timeout(after: Duration) -> Error {
    Error::new(Kind::ConnectTimeout(after)).with(TimedOut(after))
}

/// Creates an `Error` for a non-retryable receive failure.
pub fn io<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Io).with(e.into())
}
