//! Storage Layer
//!
//! Configuration file access.

pub mod config;

pub use config::*;
