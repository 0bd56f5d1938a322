//! [`Command`] for registering a new [`Property`].

use common::{operations::Insert, Money};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use url::Url;

use crate::{
    domain::{property, Property},
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for registering a new [`Property`].
#[derive(Clone, Debug)]
pub struct CreateProperty {
    /// [`property::Name`] of a new [`Property`].
    pub name: property::Name,

    /// [`property::Address`] of a new [`Property`].
    pub address: property::Address,

    /// [`property::Description`] of a new [`Property`].
    pub description: Option<property::Description>,

    /// Unit price of a new [`Property`].
    pub price: Money,

    /// [`property::Category`] of a new [`Property`].
    pub category: property::Category,

    /// URL of a new [`Property`]'s picture.
    pub image_url: Option<Url>,
}

impl<B> Command<CreateProperty> for Service<B>
where
    B: Backend<
        Insert<property::Draft>,
        Ok = Property,
        Err = Traced<backend::Error>,
    >,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateProperty,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateProperty {
            name,
            address,
            description,
            price,
            category,
            image_url,
        } = cmd;

        if price.is_negative() {
            return Err(tracerr::new!(E::InvalidPrice(price)));
        }

        self.backend()
            .execute(Insert(property::Draft {
                name,
                address,
                description,
                price,
                category,
                image_url,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`CreateProperty`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    #[from]
    Backend(backend::Error),

    /// Unit price of a new [`Property`] is negative.
    #[display("unit price `{_0}` must not be negative")]
    InvalidPrice(#[error(not(source))] Money),
}
