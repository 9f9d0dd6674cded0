//! Core types and configuration shared by the bug world engine and its runner.

pub mod types;
pub mod config;
pub mod error;

pub use error::{Error, Result};
pub use types::*;
pub use config::*;
