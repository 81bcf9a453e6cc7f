//! Aula core — configuration, shared result types, and small utilities.
//!
//! Everything here is plain data: no I/O beyond reading and writing the
//! config file.

pub mod config;
pub mod types;
pub mod utils;

pub use config::Config;
