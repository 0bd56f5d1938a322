//! [`Quote`] definition.

use common::{
    operations::{By, Select},
    Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Contract;
use crate::{
    domain::{
        contract::{RentalPeriod, RentalType},
        property, Property,
    },
    infra::{backend, Backend},
    pricing, Query, Service,
};

/// [`Query`] pricing a prospective [`Contract`] without signing it.
#[derive(Clone, Copy, Debug)]
pub struct Quote {
    /// ID of the [`Property`] to rent.
    pub property_id: property::Id,

    /// [`RentalPeriod`] to rent the [`Property`] for.
    pub period: RentalPeriod,

    /// [`RentalType`] to bill by.
    ///
    /// [`Config::default_rental_type`] is used if [`None`].
    ///
    /// [`Config::default_rental_type`]: crate::Config::default_rental_type
    pub rental_type: Option<RentalType>,
}

/// Output of the [`Quote`] [`Query`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Output {
    /// Quoted [`Property`].
    pub property: Property,

    /// [`RentalType`] the total price is billed by.
    pub rental_type: RentalType,

    /// Quoted total price.
    pub total_price: Money,
}

impl<B> Query<Quote> for Service<B>
where
    B: Backend<
        Select<By<Option<Property>, property::Id>>,
        Ok = Option<Property>,
        Err = Traced<backend::Error>,
    >,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, query: Quote) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let Quote {
            property_id,
            period,
            rental_type,
        } = query;
        let rental_type =
            rental_type.unwrap_or(self.config().default_rental_type);

        let property = self
            .backend()
            .execute(Select(By::<Option<Property>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())?;

        let total_price =
            pricing::total_price(&period, property.price, rental_type)
                .map_err(tracerr::from_and_wrap!(=> E))?;

        Ok(Output {
            property,
            rental_type,
            total_price,
        })
    }
}

/// Error of [`Quote`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    #[from]
    Backend(backend::Error),

    /// Pricing of the [`RentalPeriod`] failed.
    #[display("cannot price the `Contract`: {_0}")]
    #[from]
    Pricing(pricing::Error),

    /// [`Property`] with the provided ID does not exist.
    #[display("`Property(id: {_0})` does not exist")]
    PropertyNotExists(#[error(not(source))] property::Id),
}
