//! [`Backend`] operations of the [`Http`] client.
//!
//! Wire records are private to each module and are validated once, when
//! converted into domain types.

mod contract;
mod damage_report;
mod payment;
mod property;

use std::str::FromStr;

use common::Money;
use tracerr::Traced;

use crate::infra::backend::{self, http::Error};
#[cfg(doc)]
use crate::infra::{Backend, Http};

/// Validates the provided wire `record` into a domain `T`.
fn validate<R, T>(record: R) -> Result<T, Traced<backend::Error>>
where
    T: TryFrom<R, Error = Error>,
{
    T::try_from(record)
        .map_err(tracerr::from_and_wrap!(=> Error))
        .map_err(tracerr::map_from)
}

/// Parses the required text `field` with the provided constructor.
fn text<T>(
    field: &str,
    raw: &str,
    new: impl FnOnce(String) -> Option<T>,
) -> Result<T, Error> {
    new(raw.trim().to_owned())
        .ok_or_else(|| Error::malformed(format!("invalid `{field}`: {raw:?}")))
}

/// Parses the optional text `field` with the provided constructor.
///
/// A blank value is treated as an absent one.
fn optional_text<T>(
    field: &str,
    raw: Option<&str>,
    new: impl FnOnce(String) -> Option<T>,
) -> Result<Option<T>, Error> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => text(field, raw, new).map(Some),
    }
}

/// Parses the kind `field` from its backend string.
fn kind<T: FromStr>(field: &str, raw: &str) -> Result<T, Error> {
    raw.parse()
        .map_err(|_| Error::malformed(format!("unknown `{field}`: {raw:?}")))
}

/// Ensures the money `field` is not negative.
fn non_negative(field: &str, amount: Money) -> Result<Money, Error> {
    if amount.is_negative() {
        return Err(Error::malformed(format!(
            "`{field}` must not be negative, got {amount}",
        )));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use common::Money;

    use crate::domain::{contract, property};

    use super::{kind, non_negative, optional_text, text};

    #[test]
    fn trims_text() {
        assert_eq!(
            text("name", " Studio 12 ", property::Name::new).ok(),
            property::Name::new("Studio 12"),
        );
        assert!(text("name", "   ", property::Name::new).is_err());
    }

    #[test]
    fn blank_optional_text_is_absent() {
        assert_eq!(
            optional_text("description", Some(" "), property::Description::new)
                .unwrap(),
            None,
        );
        assert_eq!(
            optional_text("description", None, property::Description::new)
                .unwrap(),
            None,
        );
        assert!(optional_text(
            "description",
            Some("x".repeat(600).as_str()),
            property::Description::new,
        )
        .is_err());
    }

    #[test]
    fn rejects_unknown_kinds() {
        assert_eq!(
            kind::<contract::Status>("status", "cancelled").ok(),
            Some(contract::Status::Cancelled),
        );
        assert!(kind::<contract::Status>("status", "paused").is_err());
    }

    #[test]
    fn rejects_negative_money() {
        assert!(non_negative("price", Money::ZERO).is_ok());
        assert!(non_negative("price", "-1".parse().unwrap()).is_err());
    }
}
