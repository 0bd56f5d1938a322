//! [`Contract`] read model definition.

use derive_more::{AsRef, Display, From, Into};

#[cfg(doc)]
use crate::domain::Contract;

/// Wrapper around [`Contract`] indicating that it [`is_active()`].
///
/// [`is_active()`]: Contract::is_active
#[derive(Clone, Copy, Debug)]
pub struct Active<T>(pub T);

/// Printable document of a [`Contract`], rendered by the backend as HTML.
#[derive(AsRef, Clone, Debug, Display, Eq, From, Into, PartialEq)]
#[as_ref(str)]
pub struct Document(String);

impl Document {
    /// Returns the HTML markup of this [`Document`].
    #[must_use]
    pub fn html(&self) -> &str {
        &self.0
    }
}

pub mod list {
    //! [`Contract`]s list definitions.

    use crate::domain::{contract, property, Contract};

    /// Filter of a [`Contract`]s list.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter {
        /// ID of the rented [`Property`] to list [`Contract`]s of.
        ///
        /// [`Property`]: crate::domain::Property
        pub property_id: Option<property::Id>,

        /// [`contract::Status`] to list [`Contract`]s in.
        pub status: Option<contract::Status>,
    }

    impl Filter {
        /// Indicates whether the provided [`Contract`] passes this [`Filter`].
        #[must_use]
        pub fn matches(&self, contract: &Contract) -> bool {
            self.property_id.map_or(true, |id| contract.property_id == id)
                && self.status.map_or(true, |s| contract.status == s)
        }
    }

    #[cfg(test)]
    mod tests {
        use common::Money;

        use crate::domain::{
            contract::{self, RentalPeriod},
            property, tenant, Contract,
        };

        use super::Filter;

        fn contract(property_id: i64, status: contract::Status) -> Contract {
            Contract {
                id: contract::Id::from(1),
                property_id: property::Id::from(property_id),
                tenant_id: tenant::Id::from(1),
                period: RentalPeriod::new(
                    "2024-01-01".parse().unwrap(),
                    "2024-02-01".parse().unwrap(),
                ),
                deposit: Money::ZERO,
                total_price: Money::ZERO,
                status,
            }
        }

        #[test]
        fn empty_filter_matches_everything() {
            let filter = Filter::default();
            for status in contract::Status::all() {
                assert!(filter.matches(&contract(1, status)));
            }
        }

        #[test]
        fn filters_by_property_and_status() {
            let filter = Filter {
                property_id: Some(2.into()),
                status: Some(contract::Status::Active),
            };

            assert!(filter.matches(&contract(2, contract::Status::Active)));
            assert!(!filter.matches(&contract(1, contract::Status::Active)));
            assert!(!filter.matches(&contract(2, contract::Status::Ended)));
        }
    }
}
