//! Payment management.

use service::{
    command::{
        self, DeletePayment, RecordPayment, TopUpPayment, UpdatePayment,
    },
    domain::payment::PaymentDate,
    query,
    Command as _,
};
use tracing as log;

use crate::{args::PaymentAction, define_error, output, AsError, Error, Service};

#[tracing::instrument(skip_all, fields(action = ?action))]
pub(super) async fn run(
    service: &Service,
    action: PaymentAction,
) -> Result<String, Error> {
    match action {
        PaymentAction::List { contract } => {
            let payments = service
                .execute(query::payment::ByContract::by(contract))
                .await
                .map_err(AsError::into_error)?;
            Ok(output::payments(&payments))
        }
        PaymentAction::Add {
            contract,
            amount,
            date,
            note,
        } => {
            let payment = service
                .execute(RecordPayment {
                    contract_id: contract,
                    amount,
                    date: date.unwrap_or_else(PaymentDate::today),
                    note,
                })
                .await
                .map_err(AsError::into_error)?;
            log::info!("recorded `Payment(id: {})`", payment.id);
            Ok(output::payments(&[payment]))
        }
        PaymentAction::Edit {
            id,
            contract,
            amount,
            date,
            note,
        } => {
            let payment = service
                .execute(UpdatePayment {
                    payment_id: id,
                    contract_id: contract,
                    amount,
                    date,
                    note,
                })
                .await
                .map_err(AsError::into_error)?;
            Ok(output::payments(&[payment]))
        }
        PaymentAction::Delete { id } => {
            service
                .execute(DeletePayment { payment_id: id })
                .await
                .map_err(AsError::into_error)?;
            Ok(format!("Payment {id} deleted"))
        }
        PaymentAction::TopUp { contract, date } => {
            let payment = service
                .execute(TopUpPayment {
                    contract_id: contract,
                    date,
                })
                .await
                .map_err(AsError::into_error)?;
            log::info!(
                "topped up `Contract(id: {contract})` with {}",
                payment.amount,
            );
            Ok(output::payments(&[payment]))
        }
    }
}

define_error! {
    enum PaymentError {
        #[code = "CONTRACT_NOT_EXISTS"]
        #[message = "Contract does not exist"]
        ContractNotExists,

        #[code = "INVALID_AMOUNT"]
        #[message = "Payment amount must be positive"]
        InvalidAmount,

        #[code = "PAYMENT_NOT_EXISTS"]
        #[message = "Payment does not exist"]
        PaymentNotExists,

        #[code = "NOTHING_OUTSTANDING"]
        #[message = "Contract is already paid in full"]
        NothingOutstanding,
    }
}

impl AsError for command::record_payment::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::ContractNotExists(_) => {
                Some(PaymentError::ContractNotExists.into())
            }
            Self::InvalidAmount(_) => Some(PaymentError::InvalidAmount.into()),
        }
    }
}

impl AsError for command::update_payment::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::ContractNotExists(_) => {
                Some(PaymentError::ContractNotExists.into())
            }
            Self::InvalidAmount(_) => Some(PaymentError::InvalidAmount.into()),
            Self::PaymentNotExists(_) => {
                Some(PaymentError::PaymentNotExists.into())
            }
        }
    }
}

impl AsError for command::delete_payment::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::PaymentNotExists(_) => {
                Some(PaymentError::PaymentNotExists.into())
            }
        }
    }
}

impl AsError for command::top_up_payment::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::ContractNotExists(_) => {
                Some(PaymentError::ContractNotExists.into())
            }
            Self::NothingOutstanding(_) => {
                Some(PaymentError::NothingOutstanding.into())
            }
        }
    }
}
