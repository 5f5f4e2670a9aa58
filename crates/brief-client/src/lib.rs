//! Remote brief client.
//!
//! Talks HTTP to the brief-generation backend: submits the accumulated
//! conversation and document set, and uploads supporting documents. The
//! client performs no business interpretation of payloads; that is the
//! session orchestrator's job.

pub mod client;
pub mod error;

pub use client::{BriefService, HttpBriefClient};
pub use error::ClientError;
