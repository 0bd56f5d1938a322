//! [`Command`] for settling the remaining balance of a [`Contract`].

use common::operations::{By, Insert, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{contract, payment, Contract, Payment},
    infra::{backend, Backend},
    pricing::Balance,
    Service,
};

use super::Command;

/// [`Command`] recording a single [`Payment`] of exactly the outstanding
/// balance of a [`Contract`].
#[derive(Clone, Copy, Debug)]
pub struct TopUpPayment {
    /// ID of the [`Contract`] to settle.
    pub contract_id: contract::Id,

    /// [`payment::PaymentDate`] of the [`Payment`].
    ///
    /// Today is used if [`None`].
    pub date: Option<payment::PaymentDate>,
}

impl<B> Command<TopUpPayment> for Service<B>
where
    B: Backend<
            Select<By<Option<Contract>, contract::Id>>,
            Ok = Option<Contract>,
            Err = Traced<backend::Error>,
        > + Backend<
            Select<By<Vec<Payment>, contract::Id>>,
            Ok = Vec<Payment>,
            Err = Traced<backend::Error>,
        > + Backend<
            Insert<payment::Draft>,
            Ok = Payment,
            Err = Traced<backend::Error>,
        >,
{
    type Ok = Payment;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        TopUpPayment { contract_id, date }: TopUpPayment,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let contract = self
            .backend()
            .execute(Select(By::<Option<Contract>, _>::new(contract_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ContractNotExists(contract_id))
            .map_err(tracerr::wrap!())?;

        let payments = self
            .backend()
            .execute(Select(By::<Vec<Payment>, _>::new(contract_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let balance = Balance::of(contract.total_price, &payments);
        if balance.is_settled() {
            return Err(tracerr::new!(E::NothingOutstanding(contract_id)));
        }
        log::debug!(
            "topping up `Contract(id: {contract_id})` by `{}`",
            balance.outstanding,
        );

        self.backend()
            .execute(Insert(payment::Draft {
                contract_id,
                amount: balance.outstanding,
                date: date.unwrap_or_else(payment::PaymentDate::today),
                note: Some(self.config().top_up_note.clone()),
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`TopUpPayment`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    #[from]
    Backend(backend::Error),

    /// [`Contract`] with the provided ID does not exist.
    #[display("`Contract(id: {_0})` does not exist")]
    ContractNotExists(#[error(not(source))] contract::Id),

    /// [`Contract`] is already paid in full.
    #[display("`Contract(id: {_0})` has nothing outstanding")]
    NothingOutstanding(#[error(not(source))] contract::Id),
}
