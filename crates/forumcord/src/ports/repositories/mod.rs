//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod message_log_repository;
mod webhook_repository;

pub use message_log_repository::*;
pub use webhook_repository::*;
