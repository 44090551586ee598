//! Typed model of virtual branches, commits and their forge links, built
//! from the JSON payloads of the branch backend.

pub mod config;
pub mod error;
pub mod git;
pub mod logger;

pub use config::Config;
pub use error::{Error, Result};
pub use git::payload;
