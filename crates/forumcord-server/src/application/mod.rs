//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! repositories, the host forum, and the Discord transport.

mod dispatch_service;
mod registry_service;

pub use dispatch_service::{AdHocMessage, DispatchConfig, DispatchService, DispatchSummary};
pub use registry_service::RegistryService;

#[cfg(test)]
pub(crate) mod fakes;
