//! Error types for ring lookups.

/// Errors that can occur during ring operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RingError {
    /// Lookup against a ring with no virtual nodes. Callers must treat
    /// this as "no destinations", never substitute a default.
    #[error("hash ring has no destinations")]
    Empty,
}
