//! Shared data model for the sweep: scan ranges, hardware addresses, the
//! vendor table and the operator configuration.

pub mod config;
pub mod network;
pub mod vendors;

mod macros;
