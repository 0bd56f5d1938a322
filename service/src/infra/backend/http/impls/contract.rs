//! [`Contract`]-related [`Backend`] implementations.

use common::{
    operations::{By, Delete, Insert, Select},
    Date, Money,
};
use serde::{Deserialize, Serialize};
use tracerr::Traced;

use crate::{
    domain::{
        contract::{self, RentalPeriod},
        property, tenant, Contract,
    },
    infra::{
        backend::{
            self,
            http::{Error, NO_QUERY},
        },
        Backend, Http,
    },
    read::contract::{list::Filter, Active, Document},
};

use super::{kind, non_negative, validate};

/// [`Contract`] as returned by the backend.
#[derive(Debug, Deserialize)]
struct Record {
    id: contract::Id,
    property_id: property::Id,
    tenant_id: tenant::Id,
    start_date: Date,
    end_date: Date,
    deposit: Money,
    total_price: Money,
    status: String,
}

impl TryFrom<Record> for Contract {
    type Error = Error;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        let Record {
            id,
            property_id,
            tenant_id,
            start_date,
            end_date,
            deposit,
            total_price,
            status,
        } = record;

        Ok(Self {
            id,
            property_id,
            tenant_id,
            period: RentalPeriod::new(start_date, end_date),
            deposit: non_negative("deposit", deposit)?,
            total_price: non_negative("total_price", total_price)?,
            status: kind("status", &status)?,
        })
    }
}

/// Body of a new [`Contract`] request.
#[derive(Debug, Serialize)]
struct NewRecord<'a> {
    property_id: property::Id,
    tenant_email: &'a str,
    start_date: Date,
    end_date: Date,
    deposit: Money,
    rental_type: &'static str,
}

impl<'a> From<&'a contract::Draft> for NewRecord<'a> {
    fn from(draft: &'a contract::Draft) -> Self {
        Self {
            property_id: draft.property_id,
            tenant_email: draft.tenant_email.as_ref(),
            start_date: draft.period.start,
            end_date: draft.period.end,
            deposit: draft.deposit,
            rental_type: draft.rental_type.as_str(),
        }
    }
}

impl Backend<Select<By<Vec<Contract>, Filter>>> for Http {
    type Ok = Vec<Contract>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Contract>, Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();
        let contracts = self
            .get::<Vec<Record>, _>("contracts/", NO_QUERY)
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(validate)
            .collect::<Result<Vec<Contract>, _>>()
            .map_err(tracerr::wrap!())?;
        // Backend has no filtering for `Contract`s.
        Ok(contracts.into_iter().filter(|c| filter.matches(c)).collect())
    }
}

impl Backend<Select<By<Option<Contract>, contract::Id>>> for Http {
    type Ok = Option<Contract>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Contract>, contract::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .execute(Select(By::<Vec<Contract>, _>::new(Filter::default())))
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .find(|c| c.id == id))
    }
}

impl Backend<Select<By<Vec<Active<Contract>>, property::Id>>> for Http {
    type Ok = Vec<Active<Contract>>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Active<Contract>>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = Filter {
            property_id: Some(by.into_inner()),
            status: Some(contract::Status::Active),
        };
        Ok(self
            .execute(Select(By::<Vec<Contract>, _>::new(filter)))
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(Active)
            .collect())
    }
}

impl Backend<Select<By<Document, contract::Id>>> for Http {
    type Ok = Document;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Document, contract::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.get_text(&format!("contracts/{id}/download"))
            .await
            .map(Document::from)
            .map_err(tracerr::wrap!())
    }
}

impl Backend<Insert<contract::Draft>> for Http {
    type Ok = Contract;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<contract::Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        let record = self
            .send_json::<Record, _>(
                reqwest::Method::POST,
                "contracts/",
                &NewRecord::from(&draft),
            )
            .await
            .map_err(tracerr::wrap!())?;
        validate(record).map_err(tracerr::wrap!())
    }
}

impl Backend<Delete<contract::Id>> for Http {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Delete(id): Delete<contract::Id>,
    ) -> Result<Self::Ok, Self::Err> {
        self.delete(&format!("contracts/{id}"))
            .await
            .map_err(tracerr::wrap!())
    }
}
