//! Domain model for evaluation notifications.

mod payload;
mod policy;

pub use payload::EvaluationPayload;
pub use policy::RetryPolicy;
