use serde::{Deserialize, Serialize};

/// Where a comment sits relative to whatever was printed before it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub enum CommentPosition {
    /// At the end of the previous line.
    SameLine,
    /// On its own line.
    NextLine,
    /// On its own line, after an empty one.
    AfterBlankLine,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Comment {
    pub position: CommentPosition,
    /// Comment text including its `//` or `/* */` markers.
    pub text: String,
    /// Whitespace in front of a same-line comment; one space when empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub gap: String,
}

impl Comment {
    pub fn new(position: CommentPosition, text: impl Into<String>) -> Self {
        Self {
            position,
            text: text.into(),
            gap: String::new(),
        }
    }

    pub fn with_gap(mut self, gap: impl Into<String>) -> Self {
        self.gap = gap.into();
        self
    }

    pub fn line(text: impl Into<String>) -> Self {
        Self::new(CommentPosition::NextLine, text)
    }
}

/// Layout and comments around a statement. Never interpreted by passes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct Trivia {
    /// Whether an empty line separated this statement from what precedes it.
    #[serde(default)]
    pub blank_line_before: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub leading: Vec<Comment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trailing: Vec<Comment>,
}

impl Trivia {
    pub fn is_empty(&self) -> bool {
        !self.blank_line_before && self.leading.is_empty() && self.trailing.is_empty()
    }
}
