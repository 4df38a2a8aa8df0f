//! Prompt value object

use super::error::SelectionError;
use serde::{Deserialize, Serialize};

/// A file whose text is appended to the prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub content: String,
}

impl Attachment {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// The user's prompt plus any attached files (Value Object)
///
/// The text is guaranteed to contain something other than whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    text: String,
    attachments: Vec<Attachment>,
}

impl Prompt {
    /// Create a prompt, rejecting empty or whitespace-only text
    pub fn try_new(text: impl Into<String>) -> Result<Self, SelectionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(SelectionError::EmptyPrompt);
        }
        Ok(Self {
            text,
            attachments: Vec::new(),
        })
    }

    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }

    /// The text exactly as the user typed it
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// The prompt sent downstream: the text followed by every attachment
    /// in a fenced block.
    pub fn assembled(&self) -> String {
        let mut full = self.text.clone();
        if self.attachments.is_empty() {
            return full;
        }

        full.push_str("\n\n--- Attached Files ---\n\n");
        for file in &self.attachments {
            full.push_str(&format!(
                "File: {}\n```\n{}\n```\n\n",
                file.name, file.content
            ));
        }
        full
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
