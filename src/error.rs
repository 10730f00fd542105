//! Error types for pagewatch.
//!
//! Only configuration problems and single-shot transport failures are
//! allowed to terminate the process; everything else reduces to a
//! "no match" cycle at the call site.

/// Error type for fetch and watch operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Building the HTTP client failed (bad user agent, TLS setup).
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The network round trip failed (DNS, connect, timeout, body read).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// An unrecognized system sound name was configured.
    #[error("unknown sound name: {0:?}")]
    UnknownSound(String),
}

/// Result type alias for fetch and watch operations.
pub type Result<T> = std::result::Result<T, Error>;
