//! Shared kernel for the project-brief intake workflow.
//!
//! Defines the wire/data model exchanged with the brief-generation
//! backend, the client configuration, and the base error type.

pub mod config;
pub mod error;
pub mod types;

pub use config::BriefConfig;
pub use error::{BriefError, Result};
pub use types::*;
