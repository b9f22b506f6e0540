//! [`Query`] collection related to the multiple [`Profile`]s.

use common::operations::By;

use crate::read;
#[cfg(doc)]
use crate::{domain::Profile, Query};

use super::DatabaseQuery;

/// Queries a list of [`Profile`]s.
pub type List = DatabaseQuery<
    By<read::profile::list::Page, read::profile::list::Selector>,
>;

/// Queries total count of [`Profile`]s.
pub type TotalCount = DatabaseQuery<By<read::profile::list::TotalCount, ()>>;
