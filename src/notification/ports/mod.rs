//! Port contracts for the notification context.

pub mod notifier;
pub mod sink;

pub use notifier::EvaluationNotifier;
pub use sink::{DeliveryError, EvaluationSink};
