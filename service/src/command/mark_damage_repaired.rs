//! [`Command`] for marking a [`DamageReport`] as repaired.

use common::operations::{By, Perform};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{damage_report, DamageReport},
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for marking a [`DamageReport`] as repaired.
///
/// The backend stamps the [`damage_report::RepairDate`] itself.
#[derive(Clone, Copy, Debug)]
pub struct MarkDamageRepaired {
    /// ID of the repaired [`DamageReport`].
    pub report_id: damage_report::Id,
}

impl<B> Command<MarkDamageRepaired> for Service<B>
where
    B: Backend<
        Perform<By<damage_report::Repair, damage_report::Id>>,
        Ok = DamageReport,
        Err = Traced<backend::Error>,
    >,
{
    type Ok = DamageReport;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        MarkDamageRepaired { report_id }: MarkDamageRepaired,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        self.backend()
            .execute(Perform(By::<damage_report::Repair, _>::new(report_id)))
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

/// Error of [`MarkDamageRepaired`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    #[from]
    Backend(backend::Error),

    /// [`DamageReport`] with the provided ID does not exist.
    #[display("`DamageReport(id: {_0})` does not exist")]
    DamageReportNotExists(#[error(not(source))] damage_report::Id),
}
