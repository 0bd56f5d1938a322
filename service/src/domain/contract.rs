//! [`Contract`] definitions.

use common::{define_kind, Date, Money};
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};

use crate::domain::{property, tenant};
#[cfg(doc)]
use crate::domain::{Payment, Property};

/// Rental contract signed between a tenant and the owner of a [`Property`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contract {
    /// ID of this [`Contract`].
    pub id: Id,

    /// ID of the rented [`Property`].
    pub property_id: property::Id,

    /// ID of the tenant renting the [`Property`].
    pub tenant_id: tenant::Id,

    /// [`RentalPeriod`] covered by this [`Contract`].
    pub period: RentalPeriod,

    /// Deposit paid by the tenant.
    pub deposit: Money,

    /// Total price of this [`Contract`].
    ///
    /// Derived once at signing from the [`Property`] unit price and never
    /// recomputed afterwards, even if the [`Property`] price changes.
    pub total_price: Money,

    /// [`Status`] of this [`Contract`].
    pub status: Status,
}

impl Contract {
    /// Indicates whether this [`Contract`] is still in force.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }

    /// Indicates whether this [`Contract`] occupies its [`Property`] for
    /// at least one day of the provided [`RentalPeriod`].
    #[must_use]
    pub fn occupies(&self, period: &RentalPeriod) -> bool {
        self.is_active() && self.period.overlaps(period)
    }
}

/// Data of a new [`Contract`] to be signed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Draft {
    /// ID of the [`Property`] to rent.
    pub property_id: property::Id,

    /// [`tenant::Email`] of the tenant.
    pub tenant_email: tenant::Email,

    /// [`RentalPeriod`] to rent the [`Property`] for.
    pub period: RentalPeriod,

    /// Deposit paid by the tenant at signing.
    pub deposit: Money,

    /// [`RentalType`] the total price is billed by.
    pub rental_type: RentalType,
}

/// ID of a [`Contract`].
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

/// Period a [`Property`] is rented for.
///
/// Valid only if the `end` is strictly after the `start`, but an invalid one
/// is still representable, so the pricing is the one rejecting it.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[display("{start}..{end}")]
pub struct RentalPeriod {
    /// First day of the period.
    pub start: Date,

    /// Last day of the period.
    pub end: Date,
}

impl RentalPeriod {
    /// Creates a new [`RentalPeriod`] without validating it.
    #[must_use]
    pub fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    /// Indicates whether the `end` of this [`RentalPeriod`] is strictly after
    /// its `start`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.end > self.start
    }

    /// Returns the number of calendar days in this [`RentalPeriod`].
    ///
    /// Non-positive for an invalid [`RentalPeriod`].
    #[must_use]
    pub fn days(&self) -> i64 {
        self.start.days_until(self.end)
    }

    /// Indicates whether this [`RentalPeriod`] shares at least one day with
    /// the `other` one.
    ///
    /// Both ends are inclusive, so a period starting on the day another one
    /// ends still overlaps it.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && self.end >= other.start
    }
}

define_kind! {
    #[doc = "Billing mode of a [`Contract`]."]
    enum RentalType {
        #[doc = "Billed per each started day."]
        Daily,

        #[doc = "Billed per month, rounding half a month and more up."]
        Monthly,
    }
}

define_kind! {
    #[doc = "Status of a [`Contract`]."]
    enum Status {
        #[doc = "[`Contract`] is in force."]
        Active,

        #[doc = "[`Contract`] has run its full term."]
        Ended,

        #[doc = "[`Contract`] was cancelled before its term."]
        Cancelled,
    }
}

#[cfg(test)]
mod tests {
    use super::{RentalPeriod, RentalType};

    fn period(start: &str, end: &str) -> RentalPeriod {
        RentalPeriod::new(start.parse().unwrap(), end.parse().unwrap())
    }

    #[test]
    fn validates_period() {
        assert!(period("2024-01-01", "2024-01-02").is_valid());
        assert!(!period("2024-01-01", "2024-01-01").is_valid());
        assert!(!period("2024-01-05", "2024-01-01").is_valid());
    }

    #[test]
    fn counts_days() {
        assert_eq!(period("2024-01-01", "2024-01-05").days(), 4);
        assert_eq!(period("2024-01-01", "2024-02-20").days(), 50);
        assert_eq!(period("2024-01-05", "2024-01-01").days(), -4);
    }

    #[test]
    fn detects_overlaps_inclusively() {
        let jan = period("2024-01-01", "2024-01-31");

        assert!(jan.overlaps(&period("2024-01-15", "2024-02-15")));
        assert!(jan.overlaps(&period("2024-01-31", "2024-02-15")));
        assert!(jan.overlaps(&period("2023-12-01", "2024-01-01")));
        assert!(jan.overlaps(&period("2024-01-10", "2024-01-12")));
        assert!(!jan.overlaps(&period("2024-02-01", "2024-02-15")));
        assert!(!jan.overlaps(&period("2023-12-01", "2023-12-31")));
    }

    #[test]
    fn rental_type_uses_backend_strings() {
        assert_eq!(RentalType::Daily.as_str(), "daily");
        assert_eq!("monthly".parse::<RentalType>().unwrap(), RentalType::Monthly);
        assert_eq!(RentalType::all().count(), 2);
    }
}
