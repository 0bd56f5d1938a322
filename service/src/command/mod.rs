//! [`Command`] definition.

pub mod cancel_contract;
pub mod create_contract;
pub mod create_property;
pub mod delete_damage_report;
pub mod delete_payment;
pub mod delete_property;
pub mod mark_damage_repaired;
pub mod record_payment;
pub mod report_damage;
pub mod top_up_payment;
pub mod update_damage_report;
pub mod update_payment;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    cancel_contract::CancelContract, create_contract::CreateContract,
    create_property::CreateProperty,
    delete_damage_report::DeleteDamageReport, delete_payment::DeletePayment,
    delete_property::DeleteProperty,
    mark_damage_repaired::MarkDamageRepaired, record_payment::RecordPayment,
    report_damage::ReportDamage, top_up_payment::TopUpPayment,
    update_damage_report::UpdateDamageReport, update_payment::UpdatePayment,
};
