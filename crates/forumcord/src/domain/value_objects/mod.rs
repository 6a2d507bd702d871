//! Value Objects
//!
//! Immutable value types used across the domain.

mod color;
mod event_kind;
mod forum_scope;

pub use color::*;
pub use event_kind::*;
pub use forum_scope::*;
