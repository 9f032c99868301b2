pub mod editing;
pub mod error;
pub mod formatting;
pub mod limits;

// Re-export key types for easier usage
pub use editing::{
    Cmd, CommitReport, Document, Edit, EditQueue, Fragment, FragmentStore, QueuedEdit,
};
pub use error::EditError;
pub use limits::{Limits, PositionPolicy};
