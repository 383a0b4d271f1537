//! The concurrent probing engine: per-address reachability and identity
//! checks fanned out over a validated range, collected into one report.

pub mod probe;
pub mod report;
pub mod scanner;
