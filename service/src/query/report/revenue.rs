//! [`Revenue`] definition.

use common::{
    operations::{By, Select},
    Money,
};
use futures::future;
use tracerr::Traced;

use crate::{
    domain::{contract, Contract, Payment},
    infra::{backend, Backend},
    pricing::{self, Balance},
    read::contract::list::Filter,
    Query, Service,
};

/// [`Query`] reporting the revenue over [`Contract`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct Revenue {
    /// [`Filter`] of the [`Contract`]s to report over.
    pub filter: Filter,
}

/// Output of the [`Revenue`] [`Query`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Output {
    /// Rows of the report, one per [`Contract`].
    pub rows: Vec<Row>,

    /// Sum of the total prices of all the [`Contract`]s.
    pub billed: Money,

    /// Cash actually received over all the [`Contract`]s.
    pub received: Money,

    /// Sum of what remains to be paid over all the [`Contract`]s.
    pub outstanding: Money,
}

/// Row in the [`Output`] of the [`Revenue`] [`Query`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Row {
    /// Reported [`Contract`].
    pub contract: Contract,

    /// [`Balance`] of the [`Contract`].
    pub balance: Balance,
}

impl<B> Query<Revenue> for Service<B>
where
    B: Backend<
            Select<By<Vec<Contract>, Filter>>,
            Ok = Vec<Contract>,
            Err = Traced<backend::Error>,
        > + Backend<
            Select<By<Vec<Payment>, contract::Id>>,
            Ok = Vec<Payment>,
            Err = Traced<backend::Error>,
        >,
{
    type Ok = Output;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Revenue { filter }: Revenue,
    ) -> Result<Self::Ok, Self::Err> {
        let contracts = self
            .backend()
            .execute(Select(By::<Vec<Contract>, _>::new(filter)))
            .await
            .map_err(tracerr::wrap!())?;

        let payments = future::try_join_all(contracts.iter().map(|c| {
            self.backend()
                .execute(Select(By::<Vec<Payment>, _>::new(c.id)))
        }))
        .await
        .map_err(tracerr::wrap!())?;

        let received = pricing::revenue(contracts.iter().zip(&payments));
        let rows = contracts
            .into_iter()
            .zip(&payments)
            .map(|(contract, payments)| Row {
                balance: Balance::of(contract.total_price, payments),
                contract,
            })
            .collect::<Vec<_>>();

        Ok(Output {
            billed: rows.iter().map(|r| r.balance.total).sum(),
            outstanding: rows.iter().map(|r| r.balance.outstanding).sum(),
            received,
            rows,
        })
    }
}
