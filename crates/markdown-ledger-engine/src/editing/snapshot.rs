//! Read-only view of the committed content used as the coordinate space for
//! a batch of formatting commands.

use xi_rope::Rope;

/// A byte range `[start, end)` into the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Byte spans of every line in `rope`, newline included.
///
/// An empty rope has no lines, and a trailing newline does not open a new
/// one.
pub fn line_spans(rope: &Rope) -> Vec<Span> {
    let mut offset = 0usize;
    rope.lines_raw(..)
        .map(|line| {
            let start = offset;
            offset += line.len();
            Span { start, end: offset }
        })
        .collect()
}

/// Flattened committed text plus its line index.
///
/// Built once per formatting command. Line boundaries are always looked up
/// here, never in content that includes queued edits.
#[derive(Debug, Clone)]
pub struct SnapshotView {
    text: String,
    lines: Vec<Span>,
}

impl SnapshotView {
    pub fn new(text: String) -> Self {
        let lines = line_spans(&Rope::from(text.as_str()));
        Self { text, lines }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Byte immediately before `pos`, if any.
    pub fn byte_before(&self, pos: usize) -> Option<u8> {
        pos.checked_sub(1)
            .and_then(|i| self.text.as_bytes().get(i).copied())
    }

    pub fn byte_at(&self, pos: usize) -> Option<u8> {
        self.text.as_bytes().get(pos).copied()
    }

    /// True at the buffer start and right after a newline.
    pub fn is_line_start(&self, pos: usize) -> bool {
        pos == 0 || self.byte_before(pos) == Some(b'\n')
    }

    /// End of the line containing `pos`, excluding its newline.
    pub fn line_end(&self, pos: usize) -> usize {
        let idx = self.lines.partition_point(|line| line.start <= pos);
        let Some(line) = idx.checked_sub(1).map(|i| self.lines[i]) else {
            return self.len();
        };
        if pos >= line.end {
            return self.len();
        }
        if self.text.as_bytes()[line.end - 1] == b'\n' {
            line.end - 1
        } else {
            line.end
        }
    }

    /// Starts of the lines that begin strictly after `pos`.
    pub fn line_starts_after(&self, pos: usize) -> impl Iterator<Item = usize> + '_ {
        self.lines
            .iter()
            .map(|line| line.start)
            .filter(move |&start| start > pos)
    }
}
