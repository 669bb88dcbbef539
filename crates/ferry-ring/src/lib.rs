//! Consistent hashing ring for deterministic asset routing.
//!
//! This crate implements the one hash ring type the routing core is built
//! on: a mapping from `u64` ring positions to destination ids, where each
//! destination occupies many virtual-node positions. A routing key is
//! assigned to the first destination clockwise from the key's own
//! position, so adding or removing one destination out of N relocates
//! only about `1/(N±1)` of all keys instead of reshuffling everything.
//!
//! Virtual-node positions are derived by hashing
//! `destination_id ++ index` — never from randomness — so the same
//! destination set always reproduces the same ring, in any process.

mod error;
mod ring;

pub use error::RingError;
pub use ring::{HashRing, key_position};
