//! [`Payment`]-related [`Backend`] implementations.

use common::{
    operations::{By, Delete, Insert, Select, Update},
    Money,
};
use serde::{Deserialize, Serialize};
use tracerr::Traced;

use crate::{
    domain::{contract, payment, Payment},
    infra::{
        backend::{
            self,
            http::{Error, NO_QUERY},
        },
        Backend, Http,
    },
};

use super::{non_negative, optional_text, validate};

/// [`Payment`] as returned by the backend.
///
/// The backend omits the [`contract::Id`] of a [`Payment`], so it's
/// attached from the request.
#[derive(Debug, Deserialize)]
struct Record {
    id: payment::Id,
    amount: Money,
    payment_date: payment::PaymentDate,
    #[serde(default)]
    note: Option<String>,
    #[serde(default = "paid_by_default")]
    is_paid: bool,
}

/// Backend considers every recorded [`Payment`] as paid unless told
/// otherwise.
fn paid_by_default() -> bool {
    true
}

impl TryFrom<(contract::Id, Record)> for Payment {
    type Error = Error;

    fn try_from(
        (contract_id, record): (contract::Id, Record),
    ) -> Result<Self, Self::Error> {
        let Record {
            id,
            amount,
            payment_date,
            note,
            is_paid,
        } = record;

        Ok(Self {
            id,
            contract_id,
            amount: non_negative("amount", amount)?,
            date: payment_date,
            note: optional_text("note", note.as_deref(), payment::Note::new)?,
            is_paid,
        })
    }
}

/// Body of a new or an amended [`Payment`] request.
#[derive(Debug, Serialize)]
struct DraftRecord<'a> {
    contract_id: contract::Id,
    amount: Money,
    payment_date: payment::PaymentDate,
    note: Option<&'a str>,
}

impl<'a> From<&'a payment::Draft> for DraftRecord<'a> {
    fn from(draft: &'a payment::Draft) -> Self {
        Self {
            contract_id: draft.contract_id,
            amount: draft.amount,
            payment_date: draft.date,
            note: draft.note.as_ref().map(AsRef::as_ref),
        }
    }
}

impl Backend<Select<By<Vec<Payment>, contract::Id>>> for Http {
    type Ok = Vec<Payment>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Payment>, contract::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let contract_id = by.into_inner();
        self.get::<Vec<Record>, _>(
            &format!("contracts/{contract_id}/payments"),
            NO_QUERY,
        )
        .await
        .map_err(tracerr::wrap!())?
        .into_iter()
        .map(|record| validate((contract_id, record)))
        .collect()
    }
}

impl Backend<Insert<payment::Draft>> for Http {
    type Ok = Payment;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<payment::Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        let record = self
            .send_json::<Record, _>(
                reqwest::Method::POST,
                "payments/",
                &DraftRecord::from(&draft),
            )
            .await
            .map_err(tracerr::wrap!())?;
        validate((draft.contract_id, record)).map_err(tracerr::wrap!())
    }
}

impl Backend<Update<(payment::Id, payment::Draft)>> for Http {
    type Ok = Payment;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Update((id, draft)): Update<(payment::Id, payment::Draft)>,
    ) -> Result<Self::Ok, Self::Err> {
        let record = self
            .send_json::<Record, _>(
                reqwest::Method::PUT,
                &format!("payments/{id}"),
                &DraftRecord::from(&draft),
            )
            .await
            .map_err(tracerr::wrap!())?;
        validate((draft.contract_id, record)).map_err(tracerr::wrap!())
    }
}

impl Backend<Delete<payment::Id>> for Http {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Delete(id): Delete<payment::Id>,
    ) -> Result<Self::Ok, Self::Err> {
        self.delete(&format!("payments/{id}"))
            .await
            .map_err(tracerr::wrap!())
    }
}
