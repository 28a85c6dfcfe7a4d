pub mod classification;
pub mod constructors;
pub mod helpers;
pub mod types;

pub use classification::is_transient;
pub use constructors::*;
pub use helpers::{NoAddresses, TimedOut};
pub use types::{Error, Inner, Kind, Result};
