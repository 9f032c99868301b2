use std::collections::TryReserveError;
use std::fmt;
use std::io;

use log::{debug, warn};

use crate::editing::commit::{self, CommitReport, Replay};
use crate::editing::fragments::{Fragment, FragmentStore, copy_text};
use crate::editing::queue::{Edit, EditQueue, QueuedEdit};
use crate::editing::snapshot::SnapshotView;
use crate::error::EditError;
use crate::limits::{Limits, PositionPolicy};

/// Versioned document.
///
/// Holds the committed fragment store, the committed version and the queue
/// of edits staged against that version.
///
/// ## Staging and committing
///
/// - Submissions validate and queue edits; they never touch committed
///   content, so [`flatten`](Self::flatten) only changes on
///   [`commit`](Self::commit).
/// - Every queued position refers to the content as it was at the last
///   commit. Commit replays the whole batch against that snapshot (see
///   [`commit`](crate::editing::commit)), so edits issued in one batch never
///   have to account for each other.
/// - Each commit advances the version by one. Submissions against any other
///   version fail with [`EditError::VersionMismatch`].
///
/// ```rust
/// # use markdown_ledger_engine::Document;
/// let mut doc = Document::new();
/// doc.submit_insert(0, 0, "Hello World").unwrap();
/// doc.commit().unwrap();
///
/// doc.bold(1, 0, 5).unwrap();
/// doc.commit().unwrap();
///
/// assert_eq!(doc.flatten(), "**Hello** World");
/// assert_eq!(doc.current_version(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub(crate) committed: FragmentStore,
    pub(crate) version: u64,
    pub(crate) pending: EditQueue,
    pub(crate) limits: Limits,
    /// Sequence number for the next queued edit
    next_seq: u64,
}

impl Document {
    /// Create an empty document at version 0.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: Limits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    /// Create a document at version 0 whose committed content is `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EditError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| EditError::invalid(format!("content is not valid UTF-8: {e}")))?;
        let mut doc = Self::new();
        doc.committed.push(Fragment::try_from_str(text)?);
        Ok(doc)
    }

    pub fn current_version(&self) -> u64 {
        self.version
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Edits accepted since the last commit.
    pub fn pending(&self) -> &EditQueue {
        &self.pending
    }

    pub fn fragments(&self) -> &FragmentStore {
        &self.committed
    }

    /// Committed content as one string. Queued edits are never visible here.
    pub fn flatten(&self) -> String {
        self.committed.flatten()
    }

    /// Committed content length in bytes.
    pub fn len(&self) -> usize {
        self.committed.content_len()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    /// Write the committed content to `out`.
    pub fn print<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        for fragment in self.committed.iter() {
            out.write_all(fragment.as_str().as_bytes())?;
        }
        out.flush()
    }

    /// Queue an insert of `text` at `pos`. An empty `text` is a legal no-op.
    pub fn submit_insert(&mut self, version: u64, pos: usize, text: &str) -> Result<(), EditError> {
        self.check_version(version)?;
        let edit = self.validate_insert(pos, text)?;
        self.enqueue(version, vec![edit]);
        Ok(())
    }

    /// Queue a delete of `len` bytes at `pos`.
    pub fn submit_delete(&mut self, version: u64, pos: usize, len: usize) -> Result<(), EditError> {
        self.check_version(version)?;
        let edit = self.validate_delete(pos, len)?;
        self.enqueue(version, vec![edit]);
        Ok(())
    }

    /// Apply every pending edit and advance the version.
    ///
    /// On allocation failure nothing changes: committed content, version and
    /// the pending queue are all left as they were, so the same commit can be
    /// retried.
    pub fn commit(&mut self) -> Result<CommitReport, EditError> {
        debug_assert!(
            self.pending.iter().all(|queued| queued.version == self.version),
            "pending edits must target the committed version"
        );
        let replay = commit::replay(&self.committed, &self.pending);
        self.install(replay)
    }

    /// Second half of [`commit`](Self::commit): swap in replayed content. A
    /// failed replay returns before anything is touched.
    fn install(&mut self, replay: Result<Replay, TryReserveError>) -> Result<CommitReport, EditError> {
        let replay = replay?;

        self.committed.replace_with(replay.content);
        self.version += 1;
        self.pending.clear();

        let report = CommitReport {
            version: self.version,
            deletes_applied: replay.deletes_applied,
            inserts_applied: replay.inserts_applied,
            clamped: replay.clamped,
            len: self.committed.content_len(),
        };
        debug!(
            "committed version {}: {} deletes, {} inserts, {} clamped, length {}",
            report.version,
            report.deletes_applied,
            report.inserts_applied,
            report.clamped,
            report.len
        );
        Ok(report)
    }

    pub(crate) fn check_version(&self, supplied: u64) -> Result<(), EditError> {
        if supplied != self.version {
            warn!(
                "rejected edit against version {supplied}, document is at {}",
                self.version
            );
            return Err(EditError::VersionMismatch {
                expected: self.version,
                supplied,
            });
        }
        Ok(())
    }

    /// Validate an insert and copy its text into an owned edit.
    pub(crate) fn validate_insert(&self, pos: usize, text: &str) -> Result<Edit, EditError> {
        if let Some(max) = self.limits.max_text_len
            && text.len() > max
        {
            return Err(EditError::invalid(format!(
                "insert text is {} bytes, limit is {max}",
                text.len()
            )));
        }
        self.check_range(pos, 0)?;
        Ok(Edit::Insert {
            pos,
            text: copy_text(text)?,
        })
    }

    pub(crate) fn validate_delete(&self, pos: usize, len: usize) -> Result<Edit, EditError> {
        if len == 0 {
            return Err(EditError::invalid("delete length must be non-zero"));
        }
        self.check_range(pos, len)?;
        Ok(Edit::Delete { pos, len })
    }

    /// Under [`PositionPolicy::Reject`], fail if `pos..pos + len` leaves the
    /// committed content. Under `Clamp` the commit clamps instead.
    pub(crate) fn check_range(&self, pos: usize, len: usize) -> Result<(), EditError> {
        if self.limits.positions == PositionPolicy::Clamp {
            return Ok(());
        }
        let content_len = self.len();
        match pos.checked_add(len) {
            Some(end) if end <= content_len => Ok(()),
            _ => Err(EditError::OutOfRange {
                pos,
                len,
                content_len,
            }),
        }
    }

    /// Append already validated edits to the pending queue.
    pub(crate) fn enqueue(&mut self, version: u64, edits: Vec<Edit>) {
        let next_seq = &mut self.next_seq;
        self.pending.extend(edits.into_iter().map(|edit| {
            let seq = *next_seq;
            *next_seq += 1;
            debug!("queued {edit:?} as #{seq} against version {version}");
            QueuedEdit { seq, version, edit }
        }));
    }

    /// Committed content with its line index, for formatting commands.
    pub(crate) fn snapshot_view(&self) -> SnapshotView {
        SnapshotView::new(self.flatten())
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for fragment in self.committed.iter() {
            f.write_str(fragment.as_str())?;
        }
        Ok(())
    }
}
