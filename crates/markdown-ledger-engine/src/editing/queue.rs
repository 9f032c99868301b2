use serde::{Deserialize, Serialize};

/// A primitive edit, addressed in the coordinate space of the pre-batch
/// committed snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edit {
    Insert { pos: usize, text: String },
    Delete { pos: usize, len: usize },
}

/// An accepted edit waiting for the next commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedEdit {
    /// Submission order within the document, used for tie-breaking.
    pub seq: u64,
    /// Version the caller submitted against.
    pub version: u64,
    pub edit: Edit,
}

/// Ordered collection of pending edits.
///
/// Submission order is preserved but is not the order of application: the
/// commit replays edits in the order given by `deletes_ascending` and
/// `inserts_ascending`.
#[derive(Debug, Clone, Default)]
pub struct EditQueue {
    edits: Vec<QueuedEdit>,
}

/// A delete as replayed by the commit engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DeleteOp {
    pub pos: usize,
    pub len: usize,
}

/// An insert as replayed by the commit engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct InsertOp<'a> {
    pub pos: usize,
    pub text: &'a str,
}

impl EditQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueuedEdit> {
        self.edits.iter()
    }

    pub(crate) fn extend(&mut self, edits: impl IntoIterator<Item = QueuedEdit>) {
        self.edits.extend(edits);
    }

    pub(crate) fn clear(&mut self) {
        self.edits.clear();
    }

    /// Total bytes of text carried by queued inserts.
    pub fn inserted_bytes(&self) -> usize {
        self.edits
            .iter()
            .map(|q| match &q.edit {
                Edit::Insert { text, .. } => text.len(),
                Edit::Delete { .. } => 0,
            })
            .sum()
    }

    /// Deletes by ascending position; ties in submission order.
    pub(crate) fn deletes_ascending(&self) -> Vec<DeleteOp> {
        let mut deletes: Vec<(u64, DeleteOp)> = self
            .edits
            .iter()
            .filter_map(|q| match q.edit {
                Edit::Delete { pos, len } => Some((q.seq, DeleteOp { pos, len })),
                Edit::Insert { .. } => None,
            })
            .collect();
        deletes.sort_by(|(a_seq, a), (b_seq, b)| a.pos.cmp(&b.pos).then(a_seq.cmp(b_seq)));
        deletes.into_iter().map(|(_, op)| op).collect()
    }

    /// Inserts by ascending position; ties in reverse submission order, so
    /// the last insert submitted at a position reads first.
    pub(crate) fn inserts_ascending(&self) -> Vec<InsertOp<'_>> {
        let mut inserts: Vec<(u64, InsertOp<'_>)> = self
            .edits
            .iter()
            .filter_map(|q| match &q.edit {
                Edit::Insert { pos, text } => Some((
                    q.seq,
                    InsertOp {
                        pos: *pos,
                        text: text.as_str(),
                    },
                )),
                Edit::Delete { .. } => None,
            })
            .collect();
        inserts.sort_by(|(a_seq, a), (b_seq, b)| a.pos.cmp(&b.pos).then(b_seq.cmp(a_seq)));
        inserts.into_iter().map(|(_, op)| op).collect()
    }
}
