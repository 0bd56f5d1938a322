//! [`Property`]-related read definitions.

#[cfg(doc)]
use crate::domain::Property;

pub mod list {
    //! [`Property`] list definitions.

    use common::Money;

    use crate::domain::property;
    #[cfg(doc)]
    use crate::domain::Property;

    /// Filter of a [`Property`] list, applied by the backend.
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// [`property::Category`] to list.
        pub category: Option<property::Category>,

        /// Lowest unit price to list, inclusive.
        pub min_price: Option<Money>,

        /// Highest unit price to list, inclusive.
        pub max_price: Option<Money>,

        /// Part of a [`property::Name`] to search for.
        pub keyword: Option<String>,
    }
}
