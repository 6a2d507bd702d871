//! Service Ports
//!
//! Abstract interfaces for the host forum and the outbound transport.

mod cache;
mod delivery;
mod host;

pub use cache::*;
pub use delivery::*;
pub use host::*;
