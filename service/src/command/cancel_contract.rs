//! [`Command`] for cancelling a [`Contract`].

use common::operations::Delete;
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Contract;
use crate::{
    domain::contract,
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for cancelling a [`Contract`].
///
/// The backend removes the [`Contract`] along with its payments.
#[derive(Clone, Copy, Debug)]
pub struct CancelContract {
    /// ID of the [`Contract`] to be cancelled.
    pub contract_id: contract::Id,
}

impl<B> Command<CancelContract> for Service<B>
where
    B: Backend<Delete<contract::Id>, Ok = (), Err = Traced<backend::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        CancelContract { contract_id }: CancelContract,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        self.backend()
            .execute(Delete(contract_id))
            .await
            .map_err(|e| {
                if e.as_ref().is_not_found() {
                    tracerr::new!(E::ContractNotExists(contract_id))
                } else {
                    tracerr::map_from(e)
                }
            })
    }
}

/// Error of [`CancelContract`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    #[from]
    Backend(backend::Error),

    /// [`Contract`] with the provided ID does not exist.
    #[display("`Contract(id: {_0})` does not exist")]
    ContractNotExists(#[error(not(source))] contract::Id),
}
