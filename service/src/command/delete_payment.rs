//! [`Command`] for deleting a [`Payment`].

use common::operations::Delete;
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Payment;
use crate::{
    domain::payment,
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Payment`] recorded by mistake.
#[derive(Clone, Copy, Debug)]
pub struct DeletePayment {
    /// ID of the [`Payment`] to be deleted.
    pub payment_id: payment::Id,
}

impl<B> Command<DeletePayment> for Service<B>
where
    B: Backend<Delete<payment::Id>, Ok = (), Err = Traced<backend::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        DeletePayment { payment_id }: DeletePayment,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        self.backend()
            .execute(Delete(payment_id))
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

/// Error of [`DeletePayment`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    #[from]
    Backend(backend::Error),

    /// [`Payment`] with the provided ID does not exist.
    #[display("`Payment(id: {_0})` does not exist")]
    PaymentNotExists(#[error(not(source))] payment::Id),
}
