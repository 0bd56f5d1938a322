//! Domain definitions.

pub mod contract;
pub mod damage_report;
pub mod payment;
pub mod property;
pub mod tenant;

pub use self::{
    contract::Contract, damage_report::DamageReport, payment::Payment,
    property::Property,
};
