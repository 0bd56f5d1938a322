//! [`Query`] collection related to [`Property`]s.

use common::operations::By;

use crate::{
    domain::{property, Property},
    read::property::list::Filter,
};
#[cfg(doc)]
use crate::Query;

use super::BackendQuery;

/// Queries a [`Property`] by its [`property::Id`].
pub type ById = BackendQuery<By<Option<Property>, property::Id>>;

/// Queries [`Property`]s passing the provided [`Filter`].
pub type List = BackendQuery<By<Vec<Property>, Filter>>;
