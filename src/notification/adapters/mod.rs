//! Adapter implementations for the evaluation sink port.

pub mod http;
pub mod memory;

pub use http::HttpEvaluationSink;
pub use memory::{DeliveryAttempt, InMemoryEvaluationSink};
