//! Strata Core
//!
//! Logging and profiling glue shared by the Strata crates.

pub mod logging;
pub mod profiling;
