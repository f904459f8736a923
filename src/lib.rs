//! blockfall (workspace facade crate).
//!
//! Re-exports the engine crates under `blockfall::{core,input,term,types}` and
//! hosts the driver-side modules shared by the binary and the integration
//! tests: command line, environment config, log setup and the headless replay
//! driver.

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub mod cli;
pub mod config;
pub mod logging;
pub mod replay;
