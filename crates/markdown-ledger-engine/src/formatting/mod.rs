//! Structural markdown commands compiled to primitive inserts and deletes.
//!
//! Every command inspects the committed snapshot only, and every position it
//! emits is in that snapshot's coordinate space. Several commands may be
//! queued in one batch without seeing each other's effects; the commit
//! replay places all of them consistently.
//!
//! Inserts sharing a position read back in reverse submission order, so
//! multi-part markers at one position are submitted last part first.

mod batch;

use std::iter;
use std::sync::OnceLock;

use regex::Regex;

use crate::editing::Document;
use crate::editing::commit::floor_char_boundary;
use crate::editing::snapshot::SnapshotView;
use crate::error::EditError;
use batch::EditBatch;

/// Length of a leading list marker (`1. `, `- `, `* `, `+ `) in `line`.
fn list_prefix_len(line: &str) -> Option<usize> {
    static LIST_PREFIX: OnceLock<Regex> = OnceLock::new();
    let re = LIST_PREFIX
        .get_or_init(|| Regex::new(r"^(?:\d+\.|[-*+]) ").expect("Invalid list prefix regex"));
    re.find(line).map(|m| m.end())
}

impl Document {
    /// Insert a level 1-6 ATX heading marker at `pos`.
    pub fn heading(&mut self, version: u64, level: usize, pos: usize) -> Result<(), EditError> {
        self.check_version(version)?;
        if !(1..=6).contains(&level) {
            return Err(EditError::invalid(format!(
                "heading level must be 1-6, got {level}"
            )));
        }

        let mut batch = EditBatch::new(self, "heading");
        batch.insert(pos, &format!("{} ", "#".repeat(level)))?;
        let edits = batch.finish();
        self.enqueue(version, edits);
        Ok(())
    }

    /// Wrap `[start, end)` in `**`.
    pub fn bold(&mut self, version: u64, start: usize, end: usize) -> Result<(), EditError> {
        self.wrap_span(version, start, end, "**", "bold")
    }

    /// Wrap `[start, end)` in `*`.
    pub fn italic(&mut self, version: u64, start: usize, end: usize) -> Result<(), EditError> {
        self.wrap_span(version, start, end, "*", "italic")
    }

    /// Wrap `[start, end)` in backticks.
    pub fn code(&mut self, version: u64, start: usize, end: usize) -> Result<(), EditError> {
        self.wrap_span(version, start, end, "`", "code")
    }

    /// Turn `[start, end)` into the text of a `[text](url)` link.
    pub fn link(&mut self, version: u64, start: usize, end: usize, url: &str) -> Result<(), EditError> {
        self.check_version(version)?;
        check_span(start, end)?;
        if url.is_empty() {
            return Err(EditError::invalid("link url must not be empty"));
        }

        let mut batch = EditBatch::new(self, "link");
        batch.insert(start, "[")?;
        batch.insert(end, ")")?;
        batch.insert(end, url)?;
        batch.insert(end, "](")?;
        let edits = batch.finish();
        self.enqueue(version, edits);
        Ok(())
    }

    /// Insert a line break at `pos`.
    pub fn newline(&mut self, version: u64, pos: usize) -> Result<(), EditError> {
        self.check_version(version)?;

        let mut batch = EditBatch::new(self, "newline");
        batch.insert(pos, "\n")?;
        let edits = batch.finish();
        self.enqueue(version, edits);
        Ok(())
    }

    /// Insert `---` on a line of its own at `pos`.
    ///
    /// A newline is added before the rule unless `pos` is at a line start,
    /// and after it unless `pos` is at a newline or the end of the content.
    pub fn horizontal_rule(&mut self, version: u64, pos: usize) -> Result<(), EditError> {
        self.check_version(version)?;
        let view = self.snapshot_view();

        let mut batch = EditBatch::new(self, "horizontal_rule");
        let at = target(self, &view, pos)?;
        if at < view.len() && view.byte_at(at) != Some(b'\n') {
            batch.insert(at, "\n")?;
        }
        batch.insert(at, "---")?;
        if !view.is_line_start(at) {
            batch.insert(at, "\n")?;
        }
        let edits = batch.finish();
        self.enqueue(version, edits);
        Ok(())
    }

    /// Number `pos` and every following line `1. `, `2. `, ...
    pub fn ordered_list(&mut self, version: u64, pos: usize) -> Result<(), EditError> {
        self.list(version, pos, "ordered_list", |n| format!("{n}. "))
    }

    /// Prefix `pos` and every following line with `- `.
    pub fn unordered_list(&mut self, version: u64, pos: usize) -> Result<(), EditError> {
        self.list(version, pos, "unordered_list", |_| "- ".to_string())
    }

    /// Quote the line segment starting at `pos`.
    ///
    /// A list marker at the start of the segment is replaced by the quote
    /// marker rather than nested under it.
    pub fn blockquote(&mut self, version: u64, pos: usize) -> Result<(), EditError> {
        self.check_version(version)?;
        let view = self.snapshot_view();

        let mut batch = EditBatch::new(self, "blockquote");
        let at = target(self, &view, pos)?;
        let end = view.line_end(at);
        let segment = &view.as_str()[at..end];

        if let Some(prefix) = list_prefix_len(segment) {
            batch.delete(at, end - at)?;
            batch.insert(at, &segment[prefix..])?;
        }
        batch.insert(at, "> ")?;
        if !view.is_line_start(at) {
            batch.insert(at, "\n")?;
        }
        let edits = batch.finish();
        self.enqueue(version, edits);
        Ok(())
    }

    fn wrap_span(
        &mut self,
        version: u64,
        start: usize,
        end: usize,
        marker: &str,
        command: &'static str,
    ) -> Result<(), EditError> {
        self.check_version(version)?;
        check_span(start, end)?;

        let mut batch = EditBatch::new(self, command);
        batch.insert(end, marker)?;
        batch.insert(start, marker)?;
        let edits = batch.finish();
        self.enqueue(version, edits);
        Ok(())
    }

    /// Shared walk for both list kinds: `pos` is the first item, then every
    /// line start after it up to the end of the snapshot.
    fn list(
        &mut self,
        version: u64,
        pos: usize,
        command: &'static str,
        marker: impl Fn(usize) -> String,
    ) -> Result<(), EditError> {
        self.check_version(version)?;
        let view = self.snapshot_view();

        let mut batch = EditBatch::new(self, command);
        let at = target(self, &view, pos)?;
        for (n, line_start) in iter::once(at).chain(view.line_starts_after(at)).enumerate() {
            batch.insert(line_start, &marker(n + 1))?;
        }
        if !view.is_line_start(at) {
            batch.insert(at, "\n")?;
        }
        let edits = batch.finish();
        self.enqueue(version, edits);
        Ok(())
    }
}

fn check_span(start: usize, end: usize) -> Result<(), EditError> {
    if start >= end {
        return Err(EditError::invalid(format!(
            "span start {start} must be before end {end}"
        )));
    }
    Ok(())
}

/// Resolve `pos` to a char boundary inside `view`, after the position policy
/// has had its say.
fn target(doc: &Document, view: &SnapshotView, pos: usize) -> Result<usize, EditError> {
    doc.check_range(pos, 0)?;
    Ok(floor_char_boundary(view.as_str(), pos))
}
