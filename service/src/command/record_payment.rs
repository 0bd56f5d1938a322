//! [`Command`] for recording a new [`Payment`].

use common::{
    operations::{By, Insert, Select},
    Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{contract, payment, Contract, Payment},
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for recording a new [`Payment`] against a [`Contract`].
#[derive(Clone, Debug)]
pub struct RecordPayment {
    /// ID of the [`Contract`] the [`Payment`] is applied to.
    pub contract_id: contract::Id,

    /// Received amount.
    pub amount: Money,

    /// [`payment::PaymentDate`] when the amount was received.
    pub date: payment::PaymentDate,

    /// [`payment::Note`] to attach to the [`Payment`].
    pub note: Option<payment::Note>,
}

impl<B> Command<RecordPayment> for Service<B>
where
    B: Backend<
            Select<By<Option<Contract>, contract::Id>>,
            Ok = Option<Contract>,
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
        cmd: RecordPayment,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RecordPayment {
            contract_id,
            amount,
            date,
            note,
        } = cmd;

        if amount <= Money::ZERO {
            return Err(tracerr::new!(E::InvalidAmount(amount)));
        }

        self.backend()
            .execute(Select(By::<Option<Contract>, _>::new(contract_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ContractNotExists(contract_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        self.backend()
            .execute(Insert(payment::Draft {
                contract_id,
                amount,
                date,
                note,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`RecordPayment`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    #[from]
    Backend(backend::Error),

    /// [`Contract`] with the provided ID does not exist.
    #[display("`Contract(id: {_0})` does not exist")]
    ContractNotExists(#[error(not(source))] contract::Id),

    /// Amount of the [`Payment`] is not positive.
    #[display("payment amount `{_0}` must be positive")]
    InvalidAmount(#[error(not(source))] Money),
}
