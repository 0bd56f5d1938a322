//! [`Error`]-related definitions.

use std::fmt;

use derive_more::Error as StdError;
use itertools::Itertools as _;
use service::{infra::backend, pricing};
use tracerr::{Trace, Traced};

/// Defines a new error type convertible into an [`Error`].
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            message: $message.to_owned(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// Dashboard [`Error`] reported to the user.
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Creates a new [`Error`] representing an unexpected failure.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            code: "INTERNAL_ERROR",
            message: msg.to_string(),
            backtrace: None,
        }
    }

    /// Attaches more context to the message of this [`Error`].
    #[must_use]
    pub fn context(mut self, ctx: impl fmt::Display) -> Self {
        self.message = format!("{}: {ctx}", self.message);
        self
    }

    /// Returns the process exit status matching this [`Error`].
    ///
    /// Rejected operations exit with `1`, while unexpected failures (like an
    /// unreachable REST backend) exit with `2`.
    #[must_use]
    pub fn exit_status(&self) -> u8 {
        if self.code == "INTERNAL_ERROR" || self.code == "BACKEND_UNAVAILABLE" {
            2
        } else {
            1
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            backtrace,
            message,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("", |trace, f| f(&format_args!("\n{trace}"))),
        )
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for backend::Error {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "BACKEND_UNAVAILABLE"]
                #[message = "REST backend cannot be reached"]
                Unavailable,
            }
        }

        match self {
            Self::Http(e) => match e {
                service::infra::http::Error::Request(_) => {
                    Some(Error::Unavailable.into())
                }
                service::infra::http::Error::Status { .. }
                | service::infra::http::Error::Url(_)
                | service::infra::http::Error::Malformed(_) => None,
            },
        }
    }
}

impl AsError for pricing::Error {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "INVALID_PERIOD"]
                #[message = "Rental period must end after it starts"]
                InvalidPeriod,

                #[code = "INVALID_PRICE"]
                #[message = "Unit price must not be negative"]
                InvalidPrice,

                #[code = "PRICE_OVERFLOW"]
                #[message = "Total price is too large"]
                Overflow,
            }
        }

        Some(match self {
            Self::InvalidPeriod(period) => {
                crate::Error::from(Error::InvalidPeriod).context(period)
            }
            Self::InvalidPrice(price) => {
                crate::Error::from(Error::InvalidPrice).context(price)
            }
            Self::Overflow(price) => {
                crate::Error::from(Error::Overflow).context(price)
            }
        })
    }
}
