//! Adapter implementations for the content generation port.

pub mod memory;
pub mod openai;

pub use memory::InMemoryContentGenerator;
pub use openai::{OpenAiConfig, OpenAiContentGenerator};
