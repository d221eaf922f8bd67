//! Page behaviors as pure state transitions.
//!
//! Each module holds the selectors, fixed messages and decision functions
//! for one behavior. None of them touch the page: [`crate::page::Page`]
//! reads the current state out of the document, asks these functions what
//! should happen, and applies the answer.

pub mod booking;
pub mod dates;
pub mod navigation;
pub mod route_search;
pub mod transient;
pub mod validation;
