//! Terminal operator: print the instruction, wait for ENTER.

use async_trait::async_trait;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;

use crate::error::OperatorError;
use crate::traits::Operator;

/// Blocks on stdin of the controlling terminal.
#[derive(Debug, Clone, Default)]
pub struct ConsoleOperator;

impl ConsoleOperator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Operator for ConsoleOperator {
    async fn await_confirmation(&self, instruction: &str) -> Result<(), OperatorError> {
        let prompt = format!("{} {}", style("⏸").yellow(), style(instruction).bold());

        tokio::task::spawn_blocking(move || {
            Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
                .map(|_| ())
                .map_err(|e| OperatorError::Prompt(e.to_string()))
        })
        .await
        .map_err(|e| OperatorError::Prompt(e.to_string()))?
    }
}
