//! Calendar date utilities.

use std::{cmp::Ordering, fmt, marker::PhantomData, str::FromStr};

use derive_more::{Debug, Display, Error};
use time::{format_description::BorrowedFormatItem, macros::format_description};

/// Untyped calendar date.
pub type Date = DateOf;

/// `YYYY-MM-DD` format every [`Date`] is parsed from and formatted to.
const ISO_8601: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Calendar date without time and offset.
#[derive(Debug)]
pub struct DateOf<Of: ?Sized = ()> {
    /// Inner representation of the date.
    inner: time::Date,

    /// Type parameter describing the kind of date.
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateOf<Of> {
    /// Creates a new [`Date`] from the provided calendar components.
    ///
    /// [`None`] is returned if the components don't form a valid date.
    #[must_use]
    pub fn from_calendar_date(year: i32, month: u8, day: u8) -> Option<Self> {
        let month = time::Month::try_from(month).ok()?;
        Some(Self {
            inner: time::Date::from_calendar_date(year, month, day).ok()?,
            _of: PhantomData,
        })
    }

    /// Returns the current UTC [`Date`].
    #[must_use]
    pub fn today() -> Self {
        Self {
            inner: time::OffsetDateTime::now_utc().date(),
            _of: PhantomData,
        }
    }

    /// Parses a [`Date`] from the provided `YYYY-MM-DD` string.
    ///
    /// # Errors
    ///
    /// If the string is not a valid `YYYY-MM-DD` date.
    pub fn from_iso8601(input: &str) -> Result<Self, ParseError> {
        time::Date::parse(input, ISO_8601)
            .map(|inner| Self {
                inner,
                _of: PhantomData,
            })
            .map_err(ParseError)
    }

    /// Formats this [`Date`] as a `YYYY-MM-DD` string.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn to_iso8601(&self) -> String {
        self.inner.format(ISO_8601).unwrap_or_else(|e| {
            panic!("cannot format `Date` as `YYYY-MM-DD`: {e}")
        })
    }

    /// Returns the number of calendar days from this [`Date`] to the `later`
    /// one.
    ///
    /// Negative if `later` is actually before this [`Date`].
    #[must_use]
    pub fn days_until<Other: ?Sized>(&self, later: DateOf<Other>) -> i64 {
        (later.inner - self.inner).whole_days()
    }

    /// Returns the [`Date`] the provided number of `days` after this one.
    ///
    /// [`None`] is returned on overflow.
    #[must_use]
    pub fn checked_add_days(self, days: i64) -> Option<Self> {
        self.inner
            .checked_add(time::Duration::days(days))
            .map(Self::from)
    }

    /// Coerces one kind of [`Date`] into another.
    #[must_use]
    pub fn coerce<NewOf: ?Sized>(self) -> DateOf<NewOf> {
        DateOf {
            inner: self.inner,
            _of: PhantomData,
        }
    }
}

/// Error of parsing a [`Date`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("invalid `YYYY-MM-DD` date: {_0}")]
pub struct ParseError(time::error::Parse);

impl<Of: ?Sized> Copy for DateOf<Of> {}
impl<Of: ?Sized> Clone for DateOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateOf<Of> {}
impl<Of: ?Sized> PartialEq for DateOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<Of: ?Sized> Ord for DateOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<Of: ?Sized> PartialOrd for DateOf<Of> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Of: ?Sized> fmt::Display for DateOf<Of> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl<Of: ?Sized> FromStr for DateOf<Of> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_iso8601(s)
    }
}

impl<Of: ?Sized> From<DateOf<Of>> for time::Date {
    fn from(date: DateOf<Of>) -> Self {
        date.inner
    }
}

impl<Of: ?Sized> From<time::Date> for DateOf<Of> {
    fn from(inner: time::Date) -> Self {
        Self {
            inner,
            _of: PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.

    use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

    use super::DateOf;

    impl<Of: ?Sized> Serialize for DateOf<Of> {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            s.serialize_str(&self.to_iso8601())
        }
    }

    impl<'de, Of: ?Sized> Deserialize<'de> for DateOf<Of> {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            let raw = String::deserialize(d)?;
            Self::from_iso8601(&raw).map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Date;

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    #[test]
    fn parses_and_formats_iso8601() {
        assert_eq!(date("2024-01-05").to_string(), "2024-01-05");
        assert_eq!(
            Date::from_calendar_date(2024, 2, 29).unwrap(),
            date("2024-02-29"),
        );

        assert!(Date::from_iso8601("2024-02-30").is_err());
        assert!(Date::from_iso8601("2024-1-5").is_err());
        assert!(Date::from_iso8601("05/01/2024").is_err());
        assert!(Date::from_calendar_date(2024, 13, 1).is_none());
    }

    #[test]
    fn counts_calendar_days() {
        assert_eq!(date("2024-01-01").days_until(date("2024-01-05")), 4);
        assert_eq!(date("2024-01-01").days_until(date("2024-02-20")), 50);
        assert_eq!(date("2024-02-28").days_until(date("2024-03-01")), 2);
        assert_eq!(date("2023-02-28").days_until(date("2023-03-01")), 1);
        assert_eq!(date("2024-01-05").days_until(date("2024-01-01")), -4);
        assert_eq!(date("2024-01-05").days_until(date("2024-01-05")), 0);
    }

    #[test]
    fn adds_days() {
        assert_eq!(
            date("2024-01-31").checked_add_days(30),
            Some(date("2024-03-01")),
        );
        assert_eq!(
            date("2024-01-05").checked_add_days(-4),
            Some(date("2024-01-01")),
        );
        assert_eq!(date("2024-01-05").checked_add_days(10_000_000), None);
    }

    #[test]
    fn orders_chronologically() {
        assert!(date("2024-01-01") < date("2024-01-02"));
        assert!(date("2023-12-31") < date("2024-01-01"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_as_iso8601_string() {
        let json = serde_json::to_string(&date("2024-03-09")).unwrap();
        assert_eq!(json, "\"2024-03-09\"");

        let back: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date("2024-03-09"));

        assert!(serde_json::from_str::<Date>("\"2024-03-32\"").is_err());
    }
}
