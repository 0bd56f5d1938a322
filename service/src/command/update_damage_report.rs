//! [`Command`] for amending a [`DamageReport`].

use common::{
    operations::{By, Select, Update},
    Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{contract, damage_report, Contract, DamageReport},
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for amending a [`DamageReport`].
#[derive(Clone, Debug)]
pub struct UpdateDamageReport {
    /// ID of the [`DamageReport`] to be amended.
    pub report_id: damage_report::Id,

    /// ID of the [`Contract`] the [`DamageReport`] belongs to.
    pub contract_id: contract::Id,

    /// New [`damage_report::Description`].
    pub description: damage_report::Description,

    /// New [`damage_report::Severity`].
    pub severity: damage_report::Severity,

    /// New estimated cost of the repair.
    pub repair_cost: Money,

    /// New [`damage_report::ReportDate`].
    pub reported_at: damage_report::ReportDate,
}

impl<B> Command<UpdateDamageReport> for Service<B>
where
    B: Backend<
            Select<By<Option<Contract>, contract::Id>>,
            Ok = Option<Contract>,
            Err = Traced<backend::Error>,
        > + Backend<
            Update<(damage_report::Id, damage_report::Draft)>,
            Ok = DamageReport,
            Err = Traced<backend::Error>,
        >,
{
    type Ok = DamageReport;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateDamageReport,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateDamageReport {
            report_id,
            contract_id,
            description,
            severity,
            repair_cost,
            reported_at,
        } = cmd;

        if repair_cost.is_negative() {
            return Err(tracerr::new!(E::InvalidRepairCost(repair_cost)));
        }

        let contract = self
            .backend()
            .execute(Select(By::<Option<Contract>, _>::new(contract_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ContractNotExists(contract_id))
            .map_err(tracerr::wrap!())?;

        let draft = damage_report::Draft {
            contract_id,
            property_id: contract.property_id,
            description,
            severity,
            repair_cost,
            reported_at,
        };
        self.backend()
            .execute(Update((report_id, draft)))
            .await
            .map_err(|e| {
                if e.as_ref().is_not_found() {
                    tracerr::new!(E::DamageReportNotExists(report_id))
                } else {
                    tracerr::map_from(e)
                }
            })
    }
}

/// Error of [`UpdateDamageReport`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    #[from]
    Backend(backend::Error),

    /// [`DamageReport`] with the provided ID does not exist.
    #[display("`DamageReport(id: {_0})` does not exist")]
    DamageReportNotExists(#[error(not(source))] damage_report::Id),

    /// [`Contract`] with the provided ID does not exist.
    #[display("`Contract(id: {_0})` does not exist")]
    ContractNotExists(#[error(not(source))] contract::Id),

    /// Repair cost is negative.
    #[display("repair cost `{_0}` must not be negative")]
    InvalidRepairCost(#[error(not(source))] Money),
}
