// Minion Boot Core - Domain Logic & Ports
// NO infrastructure dependencies: the filesystem and the process table are
// reached only through ports.

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{BootstrapError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
