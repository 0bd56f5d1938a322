//! [`Payment`] definitions.

use common::{DateOf, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};

use crate::domain::contract;
#[cfg(doc)]
use crate::domain::Contract;

/// Cash receipt applied against the total price of a [`Contract`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Payment {
    /// ID of this [`Payment`].
    pub id: Id,

    /// ID of the [`Contract`] this [`Payment`] is applied to.
    pub contract_id: contract::Id,

    /// Received amount.
    pub amount: Money,

    /// [`PaymentDate`] when the amount was received.
    pub date: PaymentDate,

    /// [`Note`] attached to this [`Payment`], if any.
    pub note: Option<Note>,

    /// Indicator whether the amount was actually received.
    pub is_paid: bool,
}

/// Data of a new [`Payment`] to be recorded, or of an existing one to be
/// amended.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Draft {
    /// ID of the [`Contract`] the [`Payment`] is applied to.
    pub contract_id: contract::Id,

    /// Received amount.
    pub amount: Money,

    /// [`PaymentDate`] when the amount was received.
    pub date: PaymentDate,

    /// [`Note`] attached to the [`Payment`], if any.
    pub note: Option<Note>,
}

/// ID of a [`Payment`].
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

/// Date when a [`Payment`] was received.
pub type PaymentDate = DateOf<Payment>;

/// Free-form note of a [`Payment`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Note(String);

impl Note {
    /// Creates a new [`Note`] if the given `note` is valid.
    #[must_use]
    pub fn new(note: impl Into<String>) -> Option<Self> {
        let note = note.into();
        Self::check(&note).then_some(Self(note))
    }

    /// Returns the [`Note`] of a [`Payment`] settling the remaining balance
    /// of a [`Contract`].
    #[must_use]
    pub fn top_up() -> Self {
        Self("Top up remaining balance".to_owned())
    }

    /// Checks whether the given `note` is a valid [`Note`].
    fn check(note: impl AsRef<str>) -> bool {
        let note = note.as_ref();
        note.trim() == note && !note.is_empty() && note.len() <= 512
    }
}

impl FromStr for Note {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Note`")
    }
}
