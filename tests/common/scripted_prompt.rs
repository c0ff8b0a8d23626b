/*!
 * Scripted operator prompt for testing
 *
 * Answers prompts from a predetermined list and records every message it
 * was shown, so tests can check whether the operator was asked at all.
 */

use std::collections::VecDeque;
use anyhow::{anyhow, Result};
use async_trait::async_trait;

use vttedit::prompt::OperatorPrompt;

/// Prompt that replays a list of answers
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<Option<String>>,
    /// Messages shown so far
    pub messages: Vec<String>,
    /// Fail instead of answering
    pub should_fail: bool,
}

impl ScriptedPrompt {
    /// Create a prompt that gives the answers in order; `None` means cancel
    pub fn new(answers: Vec<Option<&str>>) -> Self {
        Self {
            answers: answers.into_iter().map(|a| a.map(str::to_string)).collect(),
            messages: Vec::new(),
            should_fail: false,
        }
    }

    /// Create a prompt that fails on every request
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl OperatorPrompt for ScriptedPrompt {
    async fn request_text(&mut self, message: &str) -> Result<Option<String>> {
        self.messages.push(message.to_string());
        if self.should_fail {
            return Err(anyhow!("prompt closed"));
        }
        Ok(self.answers.pop_front().flatten())
    }
}
