use serde::{Deserialize, Serialize};

use crate::editing::Document;
use crate::error::EditError;

/// Commands a collaborator can submit against a document version.
///
/// Each variant maps onto one submission method of [`Document`]; none of them
/// commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Cmd {
    Insert { pos: usize, text: String },
    Delete { pos: usize, len: usize },
    Newline { pos: usize },
    Heading { level: usize, pos: usize },
    Bold { start: usize, end: usize },
    Italic { start: usize, end: usize },
    Code { start: usize, end: usize },
    Link { start: usize, end: usize, url: String },
    HorizontalRule { pos: usize },
    OrderedList { pos: usize },
    UnorderedList { pos: usize },
    Blockquote { pos: usize },
}

impl Document {
    /// Submit `cmd` against `version`.
    pub fn apply(&mut self, version: u64, cmd: &Cmd) -> Result<(), EditError> {
        match cmd {
            Cmd::Insert { pos, text } => self.submit_insert(version, *pos, text),
            Cmd::Delete { pos, len } => self.submit_delete(version, *pos, *len),
            Cmd::Newline { pos } => self.newline(version, *pos),
            Cmd::Heading { level, pos } => self.heading(version, *level, *pos),
            Cmd::Bold { start, end } => self.bold(version, *start, *end),
            Cmd::Italic { start, end } => self.italic(version, *start, *end),
            Cmd::Code { start, end } => self.code(version, *start, *end),
            Cmd::Link { start, end, url } => self.link(version, *start, *end, url),
            Cmd::HorizontalRule { pos } => self.horizontal_rule(version, *pos),
            Cmd::OrderedList { pos } => self.ordered_list(version, *pos),
            Cmd::UnorderedList { pos } => self.unordered_list(version, *pos),
            Cmd::Blockquote { pos } => self.blockquote(version, *pos),
        }
    }
}
