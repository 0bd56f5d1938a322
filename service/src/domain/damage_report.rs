//! [`DamageReport`] definitions.

use common::{define_kind, DateOf, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};

use crate::domain::{contract, property};
#[cfg(doc)]
use crate::domain::{Contract, Property};

/// Damage of a [`Property`] found during a [`Contract`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DamageReport {
    /// ID of this [`DamageReport`].
    pub id: Id,

    /// ID of the [`Contract`] the damage happened during.
    pub contract_id: contract::Id,

    /// ID of the damaged [`Property`].
    pub property_id: property::Id,

    /// [`Description`] of the damage.
    pub description: Description,

    /// [`Severity`] of the damage.
    pub severity: Severity,

    /// Estimated cost of the repair.
    pub repair_cost: Money,

    /// [`ReportDate`] when the damage was reported.
    pub reported_at: ReportDate,

    /// [`RepairDate`] when the damage was repaired, if it was.
    pub repaired_at: Option<RepairDate>,

    /// [`Status`] of this [`DamageReport`].
    pub status: Status,
}

impl DamageReport {
    /// Indicates whether the reported damage is repaired already.
    #[must_use]
    pub fn is_repaired(&self) -> bool {
        self.status == Status::Repaired
    }
}

/// Data of a new [`DamageReport`] to be filed, or of an existing one to be
/// amended.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Draft {
    /// ID of the [`Contract`] the damage happened during.
    pub contract_id: contract::Id,

    /// ID of the damaged [`Property`].
    pub property_id: property::Id,

    /// [`Description`] of the damage.
    pub description: Description,

    /// [`Severity`] of the damage.
    pub severity: Severity,

    /// Estimated cost of the repair.
    pub repair_cost: Money,

    /// [`ReportDate`] when the damage was reported.
    pub reported_at: ReportDate,
}

/// ID of a [`DamageReport`].
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

/// Marker type indicating a [`DamageReport`] being filed.
#[derive(Clone, Copy, Debug)]
pub struct Reporting;

/// Marker type indicating a [`DamageReport`] being repaired.
#[derive(Clone, Copy, Debug)]
pub struct Repair;

/// Date when a [`DamageReport`] was filed.
pub type ReportDate = DateOf<(DamageReport, Reporting)>;

/// Date when the damage of a [`DamageReport`] was repaired.
pub type RepairDate = DateOf<(DamageReport, Repair)>;

/// Description of the damage in a [`DamageReport`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Description(String);

impl Description {
    /// Creates a new [`Description`] if the given `description` is valid.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Option<Self> {
        let description = description.into();
        Self::check(&description).then_some(Self(description))
    }

    /// Checks whether the given `description` is a valid [`Description`].
    fn check(description: impl AsRef<str>) -> bool {
        let description = description.as_ref();
        description.trim() == description
            && !description.is_empty()
            && description.len() <= 512
    }
}

impl FromStr for Description {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Description`")
    }
}

define_kind! {
    #[doc = "Severity of the damage in a [`DamageReport`]."]
    enum Severity {
        #[doc = "Cosmetic damage."]
        Low,

        #[doc = "Damage limiting the use of the [`Property`]."]
        Medium,

        #[doc = "Damage making the [`Property`] unusable."]
        High,
    }
}

define_kind! {
    #[doc = "Status of a [`DamageReport`]."]
    enum Status {
        #[doc = "Damage awaits a repair."]
        Pending,

        #[doc = "Damage is repaired."]
        Repaired,
    }
}
