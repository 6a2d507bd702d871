//! Domain Services
//!
//! Pure, deterministic functions with no I/O: markup translation,
//! mention extraction, placeholder expansion, text truncation.

pub mod markup;
pub mod mentions;
pub mod placeholder;
pub mod text;
