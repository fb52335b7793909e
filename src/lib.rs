pub mod analyzer;
pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod logging;
pub mod release_notes;
pub mod ui;

pub use error::{AutoVersionError, Result};
