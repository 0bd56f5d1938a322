//! [`Command`] for amending a recorded [`Payment`].

use common::{
    operations::{By, Select, Update},
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

/// [`Command`] for amending a recorded [`Payment`].
#[derive(Clone, Debug)]
pub struct UpdatePayment {
    /// ID of the [`Payment`] to be amended.
    pub payment_id: payment::Id,

    /// ID of the [`Contract`] the [`Payment`] is applied to.
    pub contract_id: contract::Id,

    /// New received amount.
    pub amount: Money,

    /// New [`payment::PaymentDate`].
    pub date: payment::PaymentDate,

    /// New [`payment::Note`].
    pub note: Option<payment::Note>,
}

impl<B> Command<UpdatePayment> for Service<B>
where
    B: Backend<
            Select<By<Option<Contract>, contract::Id>>,
            Ok = Option<Contract>,
            Err = Traced<backend::Error>,
        > + Backend<
            Update<(payment::Id, payment::Draft)>,
            Ok = Payment,
            Err = Traced<backend::Error>,
        >,
{
    type Ok = Payment;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdatePayment,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdatePayment {
            payment_id,
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

        let draft = payment::Draft {
            contract_id,
            amount,
            date,
            note,
        };
        self.backend()
            .execute(Update((payment_id, draft)))
            .await
            .map_err(|e| {
                if e.as_ref().is_not_found() {
                    tracerr::new!(E::PaymentNotExists(payment_id))
                } else {
                    tracerr::map_from(e)
                }
            })
    }
}

/// Error of [`UpdatePayment`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    #[from]
    Backend(backend::Error),

    /// [`Payment`] with the provided ID does not exist.
    #[display("`Payment(id: {_0})` does not exist")]
    PaymentNotExists(#[error(not(source))] payment::Id),

    /// [`Contract`] with the provided ID does not exist.
    #[display("`Contract(id: {_0})` does not exist")]
    ContractNotExists(#[error(not(source))] contract::Id),

    /// Amount of the [`Payment`] is not positive.
    #[display("payment amount `{_0}` must be positive")]
    InvalidAmount(#[error(not(source))] Money),
}
