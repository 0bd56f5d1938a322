//! [`Command`] for deleting a [`Property`].

use common::operations::Delete;
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{Contract, Property};
use crate::{
    domain::property,
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Property`].
///
/// A [`Property`] with an active [`Contract`] cannot be deleted.
#[derive(Clone, Copy, Debug)]
pub struct DeleteProperty {
    /// ID of the [`Property`] to be deleted.
    pub property_id: property::Id,
}

impl<B> Command<DeleteProperty> for Service<B>
where
    B: Backend<Delete<property::Id>, Ok = (), Err = Traced<backend::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        DeleteProperty { property_id }: DeleteProperty,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        self.backend()
            .execute(Delete(property_id))
            .await
            .map_err(|e| {
                if e.as_ref().is_not_found() {
                    tracerr::new!(E::PropertyNotExists(property_id))
                } else if e.as_ref().is_conflict() {
                    tracerr::new!(E::PropertyRented(property_id))
                } else {
                    tracerr::map_from(e)
                }
            })
    }
}

/// Error of [`DeleteProperty`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    #[from]
    Backend(backend::Error),

    /// [`Property`] with the provided ID does not exist.
    #[display("`Property(id: {_0})` does not exist")]
    PropertyNotExists(#[error(not(source))] property::Id),

    /// [`Property`] is rented under an active [`Contract`].
    #[display("`Property(id: {_0})` has an active `Contract`")]
    PropertyRented(#[error(not(source))] property::Id),
}
