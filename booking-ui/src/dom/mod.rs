//! In-memory page model.
//!
//! A small arena-backed document tree standing in for the browser DOM.
//! Pages are built from HTML with [`Document::parse`], queried with CSS
//! selectors, and mutated by the behaviors in [`crate::behaviors`].

mod document;
mod parse;
mod selector;
mod serialize;

pub use document::{Ancestors, Document, Element, NodeId, NodeKind};
pub use selector::{Selector, SelectorError};
