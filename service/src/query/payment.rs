//! [`Query`] collection related to [`Payment`]s.

use common::operations::By;

use crate::domain::{contract, Payment};
#[cfg(doc)]
use crate::{domain::Contract, Query};

use super::BackendQuery;

/// Queries [`Payment`]s of a [`Contract`].
pub type ByContract = BackendQuery<By<Vec<Payment>, contract::Id>>;
