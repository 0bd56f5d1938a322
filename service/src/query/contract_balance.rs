//! [`ContractBalance`] definition.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use futures::future;
use tracerr::Traced;

use crate::{
    domain::{contract, Contract, Payment},
    infra::{backend, Backend},
    pricing::Balance,
    Query, Service,
};

/// [`Query`] reconciling a [`Contract`] against its [`Payment`]s.
#[derive(Clone, Copy, Debug)]
pub struct ContractBalance {
    /// ID of the [`Contract`] to reconcile.
    pub contract_id: contract::Id,
}

/// Output of the [`ContractBalance`] [`Query`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Output {
    /// Reconciled [`Contract`].
    pub contract: Contract,

    /// All the [`Payment`]s of the [`Contract`].
    pub payments: Vec<Payment>,

    /// [`Balance`] of the [`Contract`].
    pub balance: Balance,
}

impl<B> Query<ContractBalance> for Service<B>
where
    B: Backend<
            Select<By<Option<Contract>, contract::Id>>,
            Ok = Option<Contract>,
            Err = Traced<backend::Error>,
        > + Backend<
            Select<By<Vec<Payment>, contract::Id>>,
            Ok = Vec<Payment>,
            Err = Traced<backend::Error>,
        >,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        ContractBalance { contract_id }: ContractBalance,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let (contract, payments) = future::try_join(
            self.backend()
                .execute(Select(By::<Option<Contract>, _>::new(contract_id))),
            self.backend()
                .execute(Select(By::<Vec<Payment>, _>::new(contract_id))),
        )
        .await
        .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let contract = contract
            .ok_or(E::ContractNotExists(contract_id))
            .map_err(tracerr::wrap!())?;

        let balance = Balance::of(contract.total_price, &payments);

        Ok(Output {
            contract,
            payments,
            balance,
        })
    }
}

/// Error of [`ContractBalance`] [`Query`] execution.
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
