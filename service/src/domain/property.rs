//! [`Property`] definitions.

use common::{define_kind, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use url::Url;

/// Property (asset) offered for rent.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Property {
    /// ID of this [`Property`].
    pub id: Id,

    /// [`Name`] of this [`Property`].
    pub name: Name,

    /// [`Address`] of this [`Property`].
    pub address: Address,

    /// [`Description`] of this [`Property`], if any.
    pub description: Option<Description>,

    /// Unit price of renting this [`Property`].
    ///
    /// Whether it's a daily or a monthly price is decided by the rental type
    /// of each contract.
    pub price: Money,

    /// [`Category`] of this [`Property`].
    pub category: Category,

    /// [`Status`] of this [`Property`].
    pub status: Status,

    /// URL of this [`Property`]'s picture, if any.
    pub image_url: Option<Url>,
}

impl Property {
    /// Indicates whether this [`Property`] may be rented right now.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == Status::Available
    }
}

/// Data of a new [`Property`] to be registered.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Draft {
    /// [`Name`] of the new [`Property`].
    pub name: Name,

    /// [`Address`] of the new [`Property`].
    pub address: Address,

    /// [`Description`] of the new [`Property`], if any.
    pub description: Option<Description>,

    /// Unit price of the new [`Property`].
    pub price: Money,

    /// [`Category`] of the new [`Property`].
    pub category: Category,

    /// URL of the new [`Property`]'s picture, if any.
    pub image_url: Option<Url>,
}

/// ID of a [`Property`].
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

/// Name of a [`Property`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Postal address of a [`Property`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Address(String);

impl Address {
    /// Creates a new [`Address`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Address`].
    fn check(address: impl AsRef<str>) -> bool {
        let address = address.as_ref();
        address.trim() == address
            && !address.is_empty()
            && address.len() <= 512
    }
}

impl FromStr for Address {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Address`")
    }
}

/// Description of a [`Property`].
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

/// Category of a [`Property`], like `real_estate` or `vehicle`.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
pub struct Category(String);

impl Category {
    /// Creates a new [`Category`] if the given `category` is valid.
    #[must_use]
    pub fn new(category: impl Into<String>) -> Option<Self> {
        let category = category.into();
        Self::check(&category).then_some(Self(category))
    }

    /// Checks whether the given `category` is a valid [`Category`].
    fn check(category: impl AsRef<str>) -> bool {
        let category = category.as_ref();
        !category.is_empty()
            && category.len() <= 64
            && !category.chars().any(char::is_whitespace)
    }
}

impl Default for Category {
    fn default() -> Self {
        Self("real_estate".to_owned())
    }
}

impl FromStr for Category {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Category`")
    }
}

define_kind! {
    #[doc = "Status of a [`Property`]."]
    enum Status {
        #[doc = "[`Property`] is free to be rented."]
        Available,

        #[doc = "[`Property`] is rented at the moment."]
        Rented,
    }
}

#[cfg(test)]
mod tests {
    use super::{Address, Category, Name, Status};

    #[test]
    fn validates_text() {
        assert!(Name::new("Studio 12").is_some());
        assert!(Name::new("").is_none());
        assert!(Name::new(" Studio").is_none());
        assert!(Name::new("x".repeat(513)).is_none());

        assert!(Address::new("12 Le Loi, District 1").is_some());
        assert!(Address::new("12 Le Loi ").is_none());
    }

    #[test]
    fn category_defaults_to_real_estate() {
        assert_eq!(AsRef::<str>::as_ref(&Category::default()), "real_estate");
        assert!(Category::new("vehicle").is_some());
        assert!(Category::new("real estate").is_none());
        assert!(Category::new("").is_none());
    }

    #[test]
    fn status_uses_backend_strings() {
        assert_eq!(Status::Available.as_str(), "available");
        assert_eq!("rented".parse::<Status>().unwrap(), Status::Rented);
        assert!("RENTED".parse::<Status>().is_err());
    }
}
