//! Evaluation notifications.
//!
//! Delivers the outcome of a finished build to the submitter's evaluation
//! webhook, retrying with capped exponential backoff until a deadline.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Retry orchestration in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
