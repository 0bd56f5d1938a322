//! Contract management.

use std::fmt::Write as _;

use service::{
    command::{self, create_contract, CancelContract, CreateContract},
    domain::contract::RentalPeriod,
    query::{self, contract_balance, quote, ContractBalance, Quote},
    read::contract::list::Filter,
    Command as _,
};
use tracing as log;

use crate::{args::ContractAction, define_error, output, AsError, Error, Service};

#[tracing::instrument(skip_all, fields(action = ?action))]
pub(super) async fn run(
    service: &Service,
    action: ContractAction,
) -> Result<String, Error> {
    match action {
        ContractAction::List { property, status } => {
            let contracts = service
                .execute(query::contract::List::by(Filter {
                    property_id: property,
                    status,
                }))
                .await
                .map_err(AsError::into_error)?;
            Ok(output::contracts(&contracts))
        }
        ContractAction::Quote {
            property,
            start,
            end,
            rental_type,
        } => {
            let period = RentalPeriod::new(start, end);
            let quote::Output {
                property,
                rental_type,
                total_price,
            } = service
                .execute(Quote {
                    property_id: property,
                    period,
                    rental_type,
                })
                .await
                .map_err(AsError::into_error)?;
            Ok(format!(
                "Renting `{}` over {period} ({} days, {rental_type}) costs {}",
                property.name,
                period.days(),
                total_price.to_grouped_string(),
            ))
        }
        ContractAction::Create {
            property,
            tenant_email,
            start,
            end,
            deposit,
            rental_type,
        } => {
            let create_contract::Output { contract, quote } = service
                .execute(CreateContract {
                    property_id: property,
                    tenant_email,
                    period: RentalPeriod::new(start, end),
                    deposit,
                    rental_type,
                })
                .await
                .map_err(AsError::into_error)?;
            log::info!("signed `Contract(id: {})`", contract.id);

            let mut out = output::contracts(&[contract]);
            _ = write!(out, "\nQuoted: {}", quote.to_grouped_string());
            Ok(out)
        }
        ContractAction::Cancel { id } => {
            service
                .execute(CancelContract { contract_id: id })
                .await
                .map_err(AsError::into_error)?;
            Ok(format!("Contract {id} cancelled"))
        }
        ContractAction::Balance { id } => {
            let contract_balance::Output {
                contract,
                payments,
                balance,
            } = service
                .execute(ContractBalance { contract_id: id })
                .await
                .map_err(AsError::into_error)?;
            Ok([
                output::contracts(&[contract]),
                output::payments(&payments),
                output::balance(&balance),
            ]
            .join("\n"))
        }
        ContractAction::Download { id, output } => {
            let document = service
                .execute(query::contract::Print::by(id))
                .await
                .map_err(AsError::into_error)?;
            let Some(path) = output else {
                return Ok(document.into());
            };
            tokio::fs::write(&path, document.html()).await.map_err(|e| {
                Error {
                    code: "OUTPUT_NOT_WRITTEN",
                    message: format!("cannot write `{}`: {e}", path.display()),
                    backtrace: None,
                }
            })?;
            Ok(format!("Contract {id} saved to `{}`", path.display()))
        }
    }
}

impl AsError for command::cancel_contract::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "CONTRACT_NOT_EXISTS"]
                #[message = "Contract does not exist"]
                ContractNotExists,
            }
        }

        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::ContractNotExists(_) => {
                Some(Error::ContractNotExists.into())
            }
        }
    }
}

impl AsError for create_contract::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "INVALID_DEPOSIT"]
                #[message = "Deposit must not be negative"]
                InvalidDeposit,

                #[code = "PERIOD_OCCUPIED"]
                #[message = "Property is already rented over the period by \
                             contract"]
                PeriodOccupied,

                #[code = "PROPERTY_NOT_EXISTS"]
                #[message = "Property does not exist"]
                PropertyNotExists,
            }
        }

        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::Pricing(e) => e.try_as_error(),
            Self::InvalidDeposit(_) => Some(Error::InvalidDeposit.into()),
            Self::PeriodOccupied(id) => {
                Some(crate::Error::from(Error::PeriodOccupied).context(id))
            }
            Self::PropertyNotExists(_) => {
                Some(Error::PropertyNotExists.into())
            }
        }
    }
}

impl AsError for quote::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "PROPERTY_NOT_EXISTS"]
                #[message = "Property does not exist"]
                PropertyNotExists,
            }
        }

        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::Pricing(e) => e.try_as_error(),
            Self::PropertyNotExists(_) => {
                Some(Error::PropertyNotExists.into())
            }
        }
    }
}

impl AsError for contract_balance::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "CONTRACT_NOT_EXISTS"]
                #[message = "Contract does not exist"]
                ContractNotExists,
            }
        }

        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::ContractNotExists(_) => {
                Some(Error::ContractNotExists.into())
            }
        }
    }
}
