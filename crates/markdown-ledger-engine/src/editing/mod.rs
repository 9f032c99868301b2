/*!
 * # Editing Core Module
 *
 * Versioned document storage with deferred, batched edits.
 *
 * ## Architecture Overview
 *
 * ### 1. Committed fragments
 * - Committed content lives in a [`FragmentStore`], an owned, ordered list of
 *   text fragments whose concatenation is the document
 * - Readers only ever see committed content through `flatten`
 *
 * ### 2. Deferred edit queue
 * - Inserts and deletes are validated on submission and queued as [`Edit`]s,
 *   tagged with the version they targeted
 * - Every queued position refers to the last committed snapshot, never to
 *   other queued edits
 *
 * ### 3. Deterministic commit
 * - One pass over the snapshot drops every deleted byte and writes inserts
 *   lowest position first; at a shared position the last submission reads
 *   first
 * - Deletes and inserts in one batch never shift each other's positions
 * - The result replaces the fragment store as a single fragment and the
 *   version advances by one
 *
 * ### 4. Commands
 * - [`Cmd`] names every submission, including the formatting commands in
 *   [`crate::formatting`], for collaborators that dispatch by name
 *
 * ## Module Structure
 *
 * - **`fragments`**: `Fragment` and `FragmentStore`, plus flattening
 * - **`queue`**: `Edit`, `QueuedEdit` and the ordered `EditQueue`
 * - **`commit`**: batch replay and the resulting `CommitReport`
 * - **`snapshot`**: line-indexed view of committed content
 * - **`document`**: the `Document` type tying the above together
 * - **`commands`**: the `Cmd` enum and `Document::apply`
 *
 * ## Usage Pattern
 *
 * ```rust
 * use markdown_ledger_engine::editing::*;
 *
 * let mut doc = Document::new();
 * let v = doc.current_version();
 * doc.submit_insert(v, 0, "B").unwrap();
 * doc.submit_insert(v, 0, "A").unwrap();
 * doc.commit().unwrap();
 * assert_eq!(doc.flatten(), "AB");
 *
 * let v = doc.current_version();
 * doc.apply(v, &Cmd::Bold { start: 0, end: 2 }).unwrap();
 * let report = doc.commit().unwrap();
 * assert_eq!(doc.flatten(), "**AB**");
 * assert_eq!(report.version, 2);
 * ```
 */

pub mod commands;
pub mod commit;
pub mod document;
pub mod fragments;
pub mod queue;
pub(crate) mod snapshot;

pub use commands::Cmd;
pub use commit::CommitReport;
pub use document::Document;
pub use fragments::{Fragment, FragmentStore};
pub use queue::{Edit, EditQueue, QueuedEdit};
