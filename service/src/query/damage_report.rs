//! [`Query`] collection related to [`DamageReport`]s.

use common::operations::By;

use crate::domain::{contract, DamageReport};
#[cfg(doc)]
use crate::{domain::Contract, Query};

use super::BackendQuery;

/// Queries [`DamageReport`]s filed during a [`Contract`].
pub type ByContract = BackendQuery<By<Vec<DamageReport>, contract::Id>>;
