//! [`Query`] collection related to a single [`Offer`].

use common::operations::By;

use crate::domain::{offer, offer::detail, Offer};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries an [`Offer`] by its [`offer::Id`].
pub type ById = DatabaseQuery<By<Option<Offer>, offer::Id>>;

/// Queries all [`detail::Detail`]s of an [`Offer`] by its [`offer::Id`].
pub type Details = DatabaseQuery<By<Vec<detail::Detail>, offer::Id>>;

/// Queries a single [`detail::Detail`] by its [`detail::Id`].
pub type DetailById = DatabaseQuery<By<Option<detail::Detail>, detail::Id>>;
