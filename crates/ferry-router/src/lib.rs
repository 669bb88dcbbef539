//! Deterministic routing of assets to regional delivery queues.
//!
//! The routing pipeline: an asset's identity fields become a composite
//! key, the [`RouterRegistry`] resolves (or lazily builds) the region's
//! [`RouterInstance`], and the instance's hash ring maps the key to a
//! destination id, which the [`AssetDispatcher`] hands to the delivery
//! transport.
//!
//! Built instances are immutable and shared lock-free; the registry's
//! region map is the only mutable state. Administrative topology changes
//! go through [`TopologyAdmin`], which persists the change and refreshes
//! the affected region so traffic shifts immediately instead of waiting
//! out the cache TTL.

pub mod admin;
pub mod dispatch;
pub mod error;
pub mod instance;
pub mod registry;

pub use admin::TopologyAdmin;
pub use dispatch::AssetDispatcher;
pub use error::{AdminError, DispatchError, RouterError};
pub use instance::RouterInstance;
pub use registry::RouterRegistry;

#[cfg(test)]
mod tests;
