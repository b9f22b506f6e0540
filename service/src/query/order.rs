//! [`Query`] collection related to a single [`Order`].

use common::operations::By;

use crate::{
    domain::{order, user, Order},
    read,
};
#[cfg(doc)]
use crate::{domain::User, Query};

use super::DatabaseQuery;

/// Queries an [`Order`] by its [`order::Id`].
pub type ById = DatabaseQuery<By<Option<Order>, order::Id>>;

/// Queries [`read::order::Counts`] of a business [`User`]'s [`Order`]s by
/// its [`user::Id`].
pub type Counts = DatabaseQuery<By<read::order::Counts, user::Id>>;
