//! AI implementations.
//!
//! Reference implementation of the [`crate::traits::AI`] trait over any
//! OpenAI-compatible chat completions endpoint.

mod openai;

pub use openai::OpenAI;
