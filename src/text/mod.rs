//! Display text generation.

pub mod describe;
pub mod template;

pub use describe::describe_objective;
pub use template::{expand_template, has_tokens, MAX_EXPANSION_PASSES};
