//! [`Command`] for deleting a [`DamageReport`].

use common::operations::Delete;
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::DamageReport;
use crate::{
    domain::damage_report,
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`DamageReport`].
#[derive(Clone, Copy, Debug)]
pub struct DeleteDamageReport {
    /// ID of the [`DamageReport`] to be deleted.
    pub report_id: damage_report::Id,
}

impl<B> Command<DeleteDamageReport> for Service<B>
where
    B: Backend<
        Delete<damage_report::Id>,
        Ok = (),
        Err = Traced<backend::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        DeleteDamageReport { report_id }: DeleteDamageReport,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        self.backend()
            .execute(Delete(report_id))
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

/// Error of [`DeleteDamageReport`] [`Command`] execution.
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
