//! Data Models
//!
//! Configuration and run result types.

pub mod config;
pub mod outcome;

pub use config::*;
pub use outcome::*;
