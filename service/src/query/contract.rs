//! [`Query`] collection related to [`Contract`]s.

use common::operations::By;

use crate::{
    domain::{contract, property, Contract},
    read::contract::{list::Filter, Active, Document},
};
#[cfg(doc)]
use crate::{domain::Property, Query};

use super::BackendQuery;

/// Queries a [`Contract`] by its [`contract::Id`].
pub type ById = BackendQuery<By<Option<Contract>, contract::Id>>;

/// Queries [`Contract`]s passing the provided [`Filter`].
pub type List = BackendQuery<By<Vec<Contract>, Filter>>;

/// Queries active [`Contract`]s of a [`Property`].
pub type ActiveByProperty =
    BackendQuery<By<Vec<Active<Contract>>, property::Id>>;

/// Queries the printable [`Document`] of a [`Contract`].
pub type Print = BackendQuery<By<Document, contract::Id>>;
