use log::trace;

use crate::editing::Document;
use crate::editing::queue::Edit;
use crate::error::EditError;

/// Primitive edits compiled from a single formatting command.
///
/// Each primitive is validated as it is added, exactly like a direct
/// submission. Nothing reaches the document until [`EditBatch::finish`], so a
/// command that fails part way leaves the pending queue untouched.
pub(crate) struct EditBatch<'a> {
    doc: &'a Document,
    command: &'static str,
    edits: Vec<Edit>,
    /// Bytes this command inserts, in submission order.
    inserted: usize,
}

impl<'a> EditBatch<'a> {
    pub fn new(doc: &'a Document, command: &'static str) -> Self {
        Self {
            doc,
            command,
            edits: Vec::new(),
            inserted: 0,
        }
    }

    pub fn insert(&mut self, pos: usize, text: &str) -> Result<(), EditError> {
        self.edits.push(self.doc.validate_insert(pos, text)?);
        self.inserted += text.len();
        Ok(())
    }

    pub fn delete(&mut self, pos: usize, len: usize) -> Result<(), EditError> {
        self.edits.push(self.doc.validate_delete(pos, len)?);
        Ok(())
    }

    pub fn finish(self) -> Vec<Edit> {
        trace!(
            "{} compiled to {} edits inserting {} bytes",
            self.command,
            self.edits.len(),
            self.inserted
        );
        self.edits
    }
}
