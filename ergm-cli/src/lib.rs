//! Support library for the `ergm` CLI binary.
//!
//! Re-exports the CLI and logging modules so integration tests can exercise
//! the command pipeline without forking a subprocess.

pub mod cli;
pub mod logging;
