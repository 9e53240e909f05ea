//! Error types for link and parameter computation
//!
//! Errors here are programming errors: they signal misuse by the
//! integrating application (an unregistered path helper, a `filters`
//! parameter that does not have the indexed-map shape), not runtime
//! conditions. Absent data — a filter that is not present, a default that
//! was never configured — is expressed as `Option`/`None` by the APIs that
//! produce it and never surfaces as an [`Error`].

use thiserror::Error;

/// Result type alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// A `PathSpec::Registered` referenced a helper name that was never
    /// registered
    #[error("Path helper is not registered: {0}")]
    UnknownPathHelper(String),

    /// The `filters` parameter exists but does not carry the dense
    /// indexed-map encoding
    #[error("Filters parameter has an invalid shape: {0}")]
    InvalidFilterShape(String),
}

// Boxed to keep the enum small; figment errors carry their full provider
// chain.
impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}
