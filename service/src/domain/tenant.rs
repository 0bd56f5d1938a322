//! Tenant definitions.
//!
//! Tenants are managed by the backend: a new one is registered implicitly
//! when a [`Contract`] is signed for an unknown [`Email`].

use std::sync::LazyLock;

use derive_more::{AsRef, Display, From, FromStr, Into};
use regex::Regex;
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::domain::Contract;

/// ID of a tenant.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(i64);

/// Email address identifying a tenant.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new("^[^\\s@]+@[^\\s@.]+(\\.[^\\s@.]+)+$")
                .expect("valid regex")
        });

        let address = address.as_ref();
        address.len() <= 254 && REGEX.is_match(address)
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

#[cfg(test)]
mod tests {
    use super::Email;

    #[test]
    fn accepts_valid_emails() {
        for address in ["khach@thue.com", "a.b+c@mail.example.vn", "x@y.io"] {
            assert!(Email::new(address).is_some(), "{address}");
        }
    }

    #[test]
    fn rejects_invalid_emails() {
        for address in
            ["", "khach", "khach@", "@thue.com", "kh ach@thue.com", "a@b", "a@b."]
        {
            assert!(Email::new(address).is_none(), "{address}");
        }
    }
}
