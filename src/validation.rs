use crate::error::{AssistantError, Result};

/// Validates chat input before anything else runs. Invalid input must
/// never reach the prompt composer or cost a provider call.
pub struct InputValidator {
    max_chars: usize,
}

impl InputValidator {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    /// Check the submitted question and return it trimmed.
    pub fn validate_question<'a>(&self, message: &'a str) -> Result<&'a str> {
        let trimmed = message.trim();
        if trimmed.is_empty() {
            return Err(AssistantError::EmptyQuestion);
        }
        if trimmed.chars().count() > self.max_chars {
            return Err(AssistantError::QuestionTooLong(self.max_chars));
        }
        Ok(trimmed)
    }
}
