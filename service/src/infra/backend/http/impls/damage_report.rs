//! [`DamageReport`]-related [`Backend`] implementations.

use common::{
    operations::{By, Delete, Insert, Perform, Select, Update},
    Money,
};
use serde::{Deserialize, Serialize};
use tracerr::Traced;

use crate::{
    domain::{contract, damage_report, property, DamageReport},
    infra::{
        backend::{
            self,
            http::{Error, NO_QUERY},
        },
        Backend, Http,
    },
};

use super::{kind, non_negative, text, validate};

/// [`DamageReport`] as returned by the backend.
#[derive(Debug, Deserialize)]
struct Record {
    id: damage_report::Id,
    contract_id: contract::Id,
    property_id: property::Id,
    description: String,
    severity: String,
    repair_cost: Money,
    reported_date: damage_report::ReportDate,
    #[serde(default)]
    repaired_date: Option<damage_report::RepairDate>,
    status: String,
}

impl TryFrom<Record> for DamageReport {
    type Error = Error;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        let Record {
            id,
            contract_id,
            property_id,
            description,
            severity,
            repair_cost,
            reported_date,
            repaired_date,
            status,
        } = record;

        Ok(Self {
            id,
            contract_id,
            property_id,
            description: text(
                "description",
                &description,
                damage_report::Description::new,
            )?,
            severity: kind("severity", &severity)?,
            repair_cost: non_negative("repair_cost", repair_cost)?,
            reported_at: reported_date,
            repaired_at: repaired_date,
            status: kind("status", &status)?,
        })
    }
}

/// Body of a new or an amended [`DamageReport`] request.
#[derive(Debug, Serialize)]
struct DraftRecord<'a> {
    contract_id: contract::Id,
    property_id: property::Id,
    description: &'a str,
    severity: &'static str,
    repair_cost: Money,
    reported_date: damage_report::ReportDate,
}

impl<'a> From<&'a damage_report::Draft> for DraftRecord<'a> {
    fn from(draft: &'a damage_report::Draft) -> Self {
        Self {
            contract_id: draft.contract_id,
            property_id: draft.property_id,
            description: draft.description.as_ref(),
            severity: draft.severity.as_str(),
            repair_cost: draft.repair_cost,
            reported_date: draft.reported_at,
        }
    }
}

impl Backend<Select<By<Vec<DamageReport>, contract::Id>>> for Http {
    type Ok = Vec<DamageReport>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<DamageReport>, contract::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let contract_id = by.into_inner();
        self.get::<Vec<Record>, _>(
            &format!("contracts/{contract_id}/damages"),
            NO_QUERY,
        )
        .await
        .map_err(tracerr::wrap!())?
        .into_iter()
        .map(validate)
        .collect()
    }
}

impl Backend<Insert<damage_report::Draft>> for Http {
    type Ok = DamageReport;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<damage_report::Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        let record = self
            .send_json::<Record, _>(
                reqwest::Method::POST,
                "damage-reports/",
                &DraftRecord::from(&draft),
            )
            .await
            .map_err(tracerr::wrap!())?;
        validate(record).map_err(tracerr::wrap!())
    }
}

impl Backend<Update<(damage_report::Id, damage_report::Draft)>> for Http {
    type Ok = DamageReport;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Update((id, draft)): Update<(damage_report::Id, damage_report::Draft)>,
    ) -> Result<Self::Ok, Self::Err> {
        let record = self
            .send_json::<Record, _>(
                reqwest::Method::PUT,
                &format!("damage-reports/{id}"),
                &DraftRecord::from(&draft),
            )
            .await
            .map_err(tracerr::wrap!())?;
        validate(record).map_err(tracerr::wrap!())
    }
}

impl Backend<Perform<By<damage_report::Repair, damage_report::Id>>> for Http {
    type Ok = DamageReport;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Perform(by): Perform<By<damage_report::Repair, damage_report::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let record = self
            .perform::<Record>(
                reqwest::Method::PATCH,
                &format!("damage-reports/{id}/mark-repaired"),
            )
            .await
            .map_err(tracerr::wrap!())?;
        validate(record).map_err(tracerr::wrap!())
    }
}

impl Backend<Delete<damage_report::Id>> for Http {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Delete(id): Delete<damage_report::Id>,
    ) -> Result<Self::Ok, Self::Err> {
        self.delete(&format!("damage-reports/{id}"))
            .await
            .map_err(tracerr::wrap!())
    }
}
