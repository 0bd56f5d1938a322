//! [`Command`] for signing a new [`Contract`].

use common::{
    operations::{By, Insert, Select},
    Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        contract::{self, RentalPeriod, RentalType},
        property, tenant, Contract, Property,
    },
    infra::{backend, Backend},
    pricing,
    read::contract::Active,
    Service,
};

use super::Command;

/// [`Command`] for signing a new [`Contract`].
///
/// The total price is quoted locally before submitting the [`Contract`], but
/// the one stored by the backend is the one kept.
#[derive(Clone, Debug)]
pub struct CreateContract {
    /// ID of the [`Property`] to rent.
    pub property_id: property::Id,

    /// [`tenant::Email`] of the tenant renting the [`Property`].
    pub tenant_email: tenant::Email,

    /// [`RentalPeriod`] to rent the [`Property`] for.
    pub period: RentalPeriod,

    /// Deposit paid by the tenant at signing.
    pub deposit: Money,

    /// [`RentalType`] to bill the [`Contract`] by.
    ///
    /// [`Config::default_rental_type`] is used if [`None`].
    ///
    /// [`Config::default_rental_type`]: crate::Config::default_rental_type
    pub rental_type: Option<RentalType>,
}

/// Output of the [`CreateContract`] [`Command`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Output {
    /// Signed [`Contract`], as stored by the backend.
    pub contract: Contract,

    /// Total price quoted locally before signing.
    pub quote: Money,
}

impl<B> Command<CreateContract> for Service<B>
where
    B: Backend<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<backend::Error>,
        > + Backend<
            Select<By<Vec<Active<Contract>>, property::Id>>,
            Ok = Vec<Active<Contract>>,
            Err = Traced<backend::Error>,
        > + Backend<
            Insert<contract::Draft>,
            Ok = Contract,
            Err = Traced<backend::Error>,
        >,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateContract,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateContract {
            property_id,
            tenant_email,
            period,
            deposit,
            rental_type,
        } = cmd;
        let rental_type =
            rental_type.unwrap_or(self.config().default_rental_type);

        if deposit.is_negative() {
            return Err(tracerr::new!(E::InvalidDeposit(deposit)));
        }

        let property = self
            .backend()
            .execute(Select(By::<Option<Property>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())?;

        let quote = pricing::total_price(&period, property.price, rental_type)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        let occupied = self
            .backend()
            .execute(Select(By::<Vec<Active<Contract>>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .into_iter()
            .find(|Active(c)| c.occupies(&period));
        if let Some(Active(other)) = occupied {
            return Err(tracerr::new!(E::PeriodOccupied(other.id)));
        }

        let contract = self
            .backend()
            .execute(Insert(contract::Draft {
                property_id,
                tenant_email,
                period,
                deposit,
                rental_type,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        if contract.total_price != quote {
            log::warn!(
                "`Contract(id: {})` total price `{}` stored by the backend \
                 differs from the quoted `{quote}` for {} `{period}`",
                contract.id,
                contract.total_price,
                rental_type,
            );
        }

        Ok(Output { contract, quote })
    }
}

/// Error of [`CreateContract`] [`Command`] execution.
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

    /// Deposit is negative.
    #[display("deposit `{_0}` must not be negative")]
    InvalidDeposit(#[error(not(source))] Money),

    /// Another active [`Contract`] occupies the [`Property`] for the
    /// requested [`RentalPeriod`].
    #[display("`Contract(id: {_0})` already occupies the `Property` then")]
    PeriodOccupied(#[error(not(source))] contract::Id),
}
