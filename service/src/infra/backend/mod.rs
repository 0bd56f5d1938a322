//! [`Backend`]-related implementations.

#[cfg(feature = "http")]
pub mod http;

use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "http")]
pub use self::http::Http;

/// Backend operation.
///
/// The rental backend owns the persisted state of properties, contracts,
/// payments and damage reports. This workspace only talks to it.
pub use common::Handler as Backend;

/// [`Backend`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "http")]
    /// [`Http`] error.
    Http(http::Error),
}

impl Error {
    /// Indicates whether the requested entity doesn't exist in the
    /// [`Backend`].
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match *self {
            #[cfg(feature = "http")]
            Self::Http(ref e) => e.is_not_found(),
        }
    }

    /// Indicates whether the [`Backend`] refused the operation because it
    /// conflicts with the current state of the entity.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        match *self {
            #[cfg(feature = "http")]
            Self::Http(ref e) => e.is_conflict(),
        }
    }
}
