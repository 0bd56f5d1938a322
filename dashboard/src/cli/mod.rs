//! Handlers of the dashboard [`Command`]s.

mod contract;
mod damage_report;
mod payment;
mod property;

use service::{query::Revenue, read::contract::list::Filter, Query as _};

use crate::{args::Command, output, AsError, Error, Service};

/// Runs the provided [`Command`] against the [`Service`], returning the
/// rendered output to show.
///
/// # Errors
///
/// If the [`Command`] is rejected or fails.
pub async fn run(service: &Service, command: Command) -> Result<String, Error> {
    match command {
        Command::Properties { action } => property::run(service, action).await,
        Command::Contracts { action } => contract::run(service, action).await,
        Command::Payments { action } => payment::run(service, action).await,
        Command::Damages { action } => {
            damage_report::run(service, action).await
        }
        Command::Revenue { property, status } => {
            revenue(
                service,
                Filter {
                    property_id: property,
                    status,
                },
            )
            .await
        }
    }
}

/// Reports revenue over the [`Filter`]ed contracts.
#[tracing::instrument(
    skip_all,
    fields(property = ?filter.property_id, status = ?filter.status),
)]
async fn revenue(service: &Service, filter: Filter) -> Result<String, Error> {
    let report = service
        .execute(Revenue { filter })
        .await
        .map_err(AsError::into_error)?;
    Ok(output::revenue(&report))
}
