//! [`Query`] collection related to the multiple [`Offer`]s.

use common::operations::By;

use crate::read;
#[cfg(doc)]
use crate::{domain::Offer, Query};

use super::DatabaseQuery;

/// Queries a list of [`Offer`]s.
pub type List =
    DatabaseQuery<By<read::offer::list::Page, read::offer::list::Selector>>;

/// Queries total count of [`Offer`]s.
pub type TotalCount = DatabaseQuery<By<read::offer::list::TotalCount, ()>>;
