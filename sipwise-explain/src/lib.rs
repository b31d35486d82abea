//! Human-readable explanations for Sipwise recommendations.
//!
//! [`ExplanationGenerator`] turns the requester's profile, history, quiz
//! answers and the final score into one to three short reasons. Failures
//! to read any signal degrade to the single fallback reason.

#![forbid(unsafe_code)]

mod error;
mod generator;
mod reasons;

pub use error::ExplanationError;
pub use generator::{COLLABORATIVE_PEERS, ExplanationGenerator};
