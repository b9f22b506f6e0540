//! [`Query`] collection related to a single [`Profile`].

use common::operations::By;

use crate::domain::{user, Profile};
#[cfg(doc)]
use crate::{domain::User, Query};

use super::DatabaseQuery;

/// Queries a [`Profile`] by the [`user::Id`] of the [`User`] owning it.
pub type ById = DatabaseQuery<By<Option<Profile>, user::Id>>;
