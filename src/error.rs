//! Error and Result module

use derive_more::{Display, Error, From};
pub use waymark_router::PatternError;

/// A convenience [`Result`](std::result::Result) for registry operations.
pub type Result<T, E = RegistryError> = std::result::Result<T, E>;

/// A path parameter was requested that the matched template does not bind.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("path parameter \"{name}\" is not bound by the matched route")]
#[non_exhaustive]
pub struct MissingParameterError {
    name: String,
}

impl MissingParameterError {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        MissingParameterError { name: name.into() }
    }

    /// Returns the requested parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Errors raised while building or installing a router.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
#[non_exhaustive]
pub enum RegistryError {
    /// A template failed to compile.
    #[display("{_0}")]
    Pattern(#[error(source)] PatternError),

    /// A router has already been installed for this process.
    #[display("a router is already installed")]
    AlreadyInstalled,
}
