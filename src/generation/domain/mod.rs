//! Domain model for content generation.

mod prompt;
mod request;
mod site;

pub use prompt::{PromptError, render_prompt};
pub use request::GenerationRequest;
pub use site::{DESCRIPTION_SEPARATOR, GeneratedSite};
