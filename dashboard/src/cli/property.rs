//! Property management.

use service::{
    command::{self, CreateProperty, DeleteProperty},
    query,
    read::property::list::Filter,
    Command as _,
};
use tracing as log;

use crate::{args::PropertyAction, define_error, output, AsError, Error, Service};

#[tracing::instrument(skip_all, fields(action = ?action))]
pub(super) async fn run(
    service: &Service,
    action: PropertyAction,
) -> Result<String, Error> {
    match action {
        PropertyAction::List {
            category,
            min_price,
            max_price,
            keyword,
        } => {
            let properties = service
                .execute(query::property::List::by(Filter {
                    category,
                    min_price,
                    max_price,
                    keyword,
                }))
                .await
                .map_err(AsError::into_error)?;
            Ok(output::properties(&properties))
        }
        PropertyAction::Add {
            name,
            address,
            price,
            description,
            category,
            image_url,
        } => {
            let property = service
                .execute(CreateProperty {
                    name,
                    address,
                    description,
                    price,
                    category: category.unwrap_or_default(),
                    image_url,
                })
                .await
                .map_err(AsError::into_error)?;
            log::info!("created `Property(id: {})`", property.id);
            Ok(output::properties(&[property]))
        }
        PropertyAction::Delete { id } => {
            service
                .execute(DeleteProperty { property_id: id })
                .await
                .map_err(AsError::into_error)?;
            Ok(format!("Property {id} deleted"))
        }
    }
}

impl AsError for command::create_property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "INVALID_PRICE"]
                #[message = "Unit price must not be negative"]
                InvalidPrice,
            }
        }

        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::InvalidPrice(_) => Some(Error::InvalidPrice.into()),
        }
    }
}

impl AsError for command::delete_property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "PROPERTY_NOT_EXISTS"]
                #[message = "Property does not exist"]
                PropertyNotExists,

                #[code = "PROPERTY_RENTED"]
                #[message = "Property has an active contract"]
                PropertyRented,
            }
        }

        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::PropertyNotExists(_) => {
                Some(Error::PropertyNotExists.into())
            }
            Self::PropertyRented(_) => Some(Error::PropertyRented.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use service::command::delete_property::ExecutionError;

    use crate::AsError as _;

    #[test]
    fn maps_deletion_errors() {
        let err = ExecutionError::PropertyRented(3.into()).as_error();
        assert_eq!(err.code, "PROPERTY_RENTED");

        let err = ExecutionError::PropertyNotExists(3.into()).as_error();
        assert_eq!(err.code, "PROPERTY_NOT_EXISTS");
    }
}
