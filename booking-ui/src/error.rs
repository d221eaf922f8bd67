//! Page-level error types.
//!
//! Missing page anchors are not errors: behaviors whose elements are absent
//! are skipped. These cover the failures a caller can actually cause.

use crate::dom::{NodeId, SelectorError};

/// Errors from driving a [`crate::page::Page`].
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    /// A selector string could not be parsed
    #[error(transparent)]
    Selector(#[from] SelectorError),

    /// An event targeted a node that is no longer in the page
    #[error("node {0} is not attached to the page")]
    DetachedNode(NodeId),

    /// The cancellation flow found no `cancel-form-{id}` form
    #[error("no cancellation form for booking {booking_id:?}")]
    CancelFormMissing { booking_id: String },

    /// Time cannot run backwards
    #[error("cannot advance time by a negative amount ({0} ms)")]
    NegativeTime(i64),

    /// Dialog template failed to render
    #[error("template error: {0}")]
    Template(#[from] askama::Error),
}
