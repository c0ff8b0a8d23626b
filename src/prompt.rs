/*!
 * Operator input capability.
 *
 * The editor never talks to a terminal or a dialog box directly. Whenever it
 * needs a short piece of text from the operator (for example a new tag) it
 * asks an `OperatorPrompt`, which the host UI implements.
 */

use anyhow::Result;
use async_trait::async_trait;

/// Request short text input from the operator
#[async_trait]
pub trait OperatorPrompt: Send {
    /// Show `message` and wait for an answer.
    ///
    /// Returns `Ok(None)` when the operator cancelled the prompt.
    async fn request_text(&mut self, message: &str) -> Result<Option<String>>;
}

/// Prompt that always answers with a fixed value; handy for batch commands
pub struct FixedPrompt {
    answer: Option<String>,
}

impl FixedPrompt {
    pub fn new(answer: Option<String>) -> Self {
        Self { answer }
    }
}

#[async_trait]
impl OperatorPrompt for FixedPrompt {
    async fn request_text(&mut self, _message: &str) -> Result<Option<String>> {
        Ok(self.answer.clone())
    }
}
