//! Configuration read from the process environment

pub mod env;
pub mod logging;

pub use env::EnvSnapshot;
pub use logging::{LogFormat, LoggingConfig};
