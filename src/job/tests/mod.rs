//! Unit tests for the job context.

mod scheduler_tests;
mod store_tests;
mod support;
