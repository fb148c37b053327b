//! Manual operator checkpoints (login, challenge solving).

use async_trait::async_trait;

use crate::error::OperatorError;

/// A human (or a stand-in) the pipeline blocks on.
#[async_trait]
pub trait Operator: Send + Sync {
    /// Show the instruction and return once the operator confirms.
    async fn await_confirmation(&self, instruction: &str) -> Result<(), OperatorError>;
}
