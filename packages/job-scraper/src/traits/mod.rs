//! Capability traits the pipeline is written against.

pub mod ai;
pub mod browser;
pub mod operator;
pub mod sink;

pub use ai::{CompletionRequest, AI};
pub use browser::{Browser, Element};
pub use operator::Operator;
pub use sink::RecordSink;
