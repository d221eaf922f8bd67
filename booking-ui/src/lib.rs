//! Client-side behaviors for a travel booking site.
//!
//! A page is parsed into a [`dom::Document`] and wrapped in a
//! [`page::Page`], which attaches the site's behaviors (mobile menu, smooth
//! scrolling, self-dismissing alerts, form validation, search form helpers,
//! booking dialogs) and drives them from user events, commands and a
//! virtual clock. Native browser facilities sit behind
//! [`platform::Platform`].

pub mod behaviors;
pub mod config;
pub mod dom;
pub mod error;
pub mod event;
pub mod page;
pub mod platform;
pub mod templates;
pub mod theme;
pub mod timers;

pub use config::UiConfig;
pub use error::UiError;
pub use event::{Command, CommandOutcome, DispatchOutcome, UiEvent};
pub use page::Page;
