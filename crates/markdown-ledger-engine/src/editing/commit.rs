use std::collections::TryReserveError;
use std::ops::Range;

use log::debug;

use crate::editing::fragments::FragmentStore;
use crate::editing::queue::{DeleteOp, EditQueue};

/// Result of a successful commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReport {
    /// Version the document advanced to.
    pub version: u64,
    pub deletes_applied: usize,
    pub inserts_applied: usize,
    /// Edits whose position or length had to be clamped to the snapshot.
    pub clamped: usize,
    /// Content length after the commit, in bytes.
    pub len: usize,
}

/// Content produced by replaying a batch, before it is installed.
#[derive(Debug)]
pub(crate) struct Replay {
    pub content: String,
    pub deletes_applied: usize,
    pub inserts_applied: usize,
    pub clamped: usize,
}

/// Replay every queued edit against the committed snapshot in one pass.
///
/// Every position is resolved once, against the snapshot: clamped to its
/// length and snapped down to a char boundary. A snapshot byte survives
/// unless some delete covers it, so disjoint deletes behave exactly as if
/// applied highest position first. Inserts are written in ascending position
/// order, each one in front of the snapshot byte it was addressed to and after
/// every insert at a lower position. Inserts sharing a position keep the last
/// submitted first, whether or not the position needed clamping.
///
/// The output is reserved up front, so allocation can only fail here, before
/// anything is replaced.
pub(crate) fn replay(committed: &FragmentStore, queue: &EditQueue) -> Result<Replay, TryReserveError> {
    let snapshot = committed.try_contiguous()?;
    let snapshot = snapshot.as_ref();
    let mut clamped = 0;

    let deletes = queue.deletes_ascending();
    let mut removed: Vec<Range<usize>> = Vec::new();
    removed.try_reserve_exact(deletes.len())?;
    for op in &deletes {
        let range = clamp_delete(snapshot, *op);
        if range.start != op.pos || range.len() != op.len {
            clamped += 1;
            debug!(
                "delete {}+{} clamped to {:?} (snapshot length {})",
                op.pos,
                op.len,
                range,
                snapshot.len()
            );
        }
        if range.is_empty() {
            continue;
        }
        match removed.last_mut() {
            Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
            _ => removed.push(range),
        }
    }
    let removed_bytes: usize = removed.iter().map(|range| range.len()).sum();

    let mut content = String::new();
    content.try_reserve_exact(snapshot.len() - removed_bytes + queue.inserted_bytes())?;

    let inserts = queue.inserts_ascending();
    let mut survivors = Survivors {
        snapshot,
        removed: &removed,
        cursor: 0,
    };
    for op in &inserts {
        let at = floor_char_boundary(snapshot, op.pos);
        if at != op.pos {
            clamped += 1;
            debug!(
                "insert at {} clamped to {} (snapshot length {})",
                op.pos,
                at,
                snapshot.len()
            );
        }
        survivors.copy_until(&mut content, at);
        content.push_str(op.text);
    }
    survivors.copy_until(&mut content, snapshot.len());

    Ok(Replay {
        content,
        deletes_applied: deletes.len(),
        inserts_applied: inserts.len(),
        clamped,
    })
}

/// Walks the snapshot left to right, skipping deleted ranges.
struct Survivors<'a> {
    snapshot: &'a str,
    /// Sorted, disjoint, non-empty ranges not yet passed.
    removed: &'a [Range<usize>],
    cursor: usize,
}

impl Survivors<'_> {
    /// Copy the surviving snapshot bytes in `cursor..to` to `out`.
    fn copy_until(&mut self, out: &mut String, to: usize) {
        while self.cursor < to {
            let removed = self.removed;
            match removed.first() {
                Some(range) if range.end <= self.cursor => self.removed = &removed[1..],
                Some(range) if range.start <= self.cursor => self.cursor = range.end.min(to),
                Some(range) => {
                    let stop = range.start.min(to);
                    out.push_str(&self.snapshot[self.cursor..stop]);
                    self.cursor = stop;
                }
                None => {
                    out.push_str(&self.snapshot[self.cursor..to]);
                    self.cursor = to;
                }
            }
        }
    }
}

/// Clamp a delete so it lies within `snapshot` on character boundaries.
fn clamp_delete(snapshot: &str, op: DeleteOp) -> Range<usize> {
    let start = floor_char_boundary(snapshot, op.pos);
    let end = floor_char_boundary(snapshot, op.pos.saturating_add(op.len)).max(start);
    start..end
}

/// Largest character boundary in `text` that is `<= index`, capped at the
/// text length.
pub(crate) fn floor_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    let mut index = index;
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
