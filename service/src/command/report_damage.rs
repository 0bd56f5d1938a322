//! [`Command`] for reporting a damage of a rented [`Property`].

use common::{
    operations::{By, Insert, Select},
    Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Property;
use crate::{
    domain::{contract, damage_report, Contract, DamageReport},
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for reporting a damage found during a [`Contract`].
///
/// The damaged [`Property`] is the one rented under the [`Contract`].
#[derive(Clone, Debug)]
pub struct ReportDamage {
    /// ID of the [`Contract`] the damage was found during.
    pub contract_id: contract::Id,

    /// [`damage_report::Description`] of the damage.
    pub description: damage_report::Description,

    /// [`damage_report::Severity`] of the damage.
    pub severity: damage_report::Severity,

    /// Estimated cost of the repair.
    pub repair_cost: Money,

    /// [`damage_report::ReportDate`] of the damage.
    ///
    /// Today is used if [`None`].
    pub reported_at: Option<damage_report::ReportDate>,
}

impl<B> Command<ReportDamage> for Service<B>
where
    B: Backend<
            Select<By<Option<Contract>, contract::Id>>,
            Ok = Option<Contract>,
            Err = Traced<backend::Error>,
        > + Backend<
            Insert<damage_report::Draft>,
            Ok = DamageReport,
            Err = Traced<backend::Error>,
        >,
{
    type Ok = DamageReport;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ReportDamage,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ReportDamage {
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

        self.backend()
            .execute(Insert(damage_report::Draft {
                contract_id,
                property_id: contract.property_id,
                description,
                severity,
                repair_cost,
                reported_at: reported_at
                    .unwrap_or_else(damage_report::ReportDate::today),
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`ReportDamage`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    #[from]
    Backend(backend::Error),

    /// [`Contract`] with the provided ID does not exist.
    #[display("`Contract(id: {_0})` does not exist")]
    ContractNotExists(#[error(not(source))] contract::Id),

    /// Repair cost is negative.
    #[display("repair cost `{_0}` must not be negative")]
    InvalidRepairCost(#[error(not(source))] Money),
}
