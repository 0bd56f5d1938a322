//! Damage report management.

use service::{
    command::{
        self, DeleteDamageReport, MarkDamageRepaired, ReportDamage,
        UpdateDamageReport,
    },
    query,
    Command as _,
};
use tracing as log;

use crate::{args::DamageAction, define_error, output, AsError, Error, Service};

#[tracing::instrument(skip_all, fields(action = ?action))]
pub(super) async fn run(
    service: &Service,
    action: DamageAction,
) -> Result<String, Error> {
    match action {
        DamageAction::List { contract } => {
            let reports = service
                .execute(query::damage_report::ByContract::by(contract))
                .await
                .map_err(AsError::into_error)?;
            Ok(output::damage_reports(&reports))
        }
        DamageAction::Report {
            contract,
            description,
            severity,
            repair_cost,
            reported_at,
        } => {
            let report = service
                .execute(ReportDamage {
                    contract_id: contract,
                    description,
                    severity,
                    repair_cost,
                    reported_at,
                })
                .await
                .map_err(AsError::into_error)?;
            log::info!("filed `DamageReport(id: {})`", report.id);
            Ok(output::damage_reports(&[report]))
        }
        DamageAction::Edit {
            id,
            contract,
            description,
            severity,
            repair_cost,
            reported_at,
        } => {
            let report = service
                .execute(UpdateDamageReport {
                    report_id: id,
                    contract_id: contract,
                    description,
                    severity,
                    repair_cost,
                    reported_at,
                })
                .await
                .map_err(AsError::into_error)?;
            Ok(output::damage_reports(&[report]))
        }
        DamageAction::Repaired { id } => {
            let report = service
                .execute(MarkDamageRepaired { report_id: id })
                .await
                .map_err(AsError::into_error)?;
            Ok(output::damage_reports(&[report]))
        }
        DamageAction::Delete { id } => {
            service
                .execute(DeleteDamageReport { report_id: id })
                .await
                .map_err(AsError::into_error)?;
            Ok(format!("Damage report {id} deleted"))
        }
    }
}

define_error! {
    enum DamageError {
        #[code = "CONTRACT_NOT_EXISTS"]
        #[message = "Contract does not exist"]
        ContractNotExists,

        #[code = "DAMAGE_REPORT_NOT_EXISTS"]
        #[message = "Damage report does not exist"]
        DamageReportNotExists,

        #[code = "INVALID_REPAIR_COST"]
        #[message = "Repair cost must not be negative"]
        InvalidRepairCost,
    }
}

impl AsError for command::report_damage::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::ContractNotExists(_) => {
                Some(DamageError::ContractNotExists.into())
            }
            Self::InvalidRepairCost(_) => {
                Some(DamageError::InvalidRepairCost.into())
            }
        }
    }
}

impl AsError for command::update_damage_report::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::ContractNotExists(_) => {
                Some(DamageError::ContractNotExists.into())
            }
            Self::DamageReportNotExists(_) => {
                Some(DamageError::DamageReportNotExists.into())
            }
            Self::InvalidRepairCost(_) => {
                Some(DamageError::InvalidRepairCost.into())
            }
        }
    }
}

impl AsError for command::mark_damage_repaired::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::DamageReportNotExists(_) => {
                Some(DamageError::DamageReportNotExists.into())
            }
        }
    }
}

impl AsError for command::delete_damage_report::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::DamageReportNotExists(_) => {
                Some(DamageError::DamageReportNotExists.into())
            }
        }
    }
}
