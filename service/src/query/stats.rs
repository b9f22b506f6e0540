//! Platform-wide statistics definitions.

use common::operations::{By, Select};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{review, Offer, Profile, Review};
use crate::{
    domain::profile,
    infra::{database, Database},
    read, Query, Service,
};

/// [`Query`] of platform-wide statistics.
///
/// Available without authentication.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Summary;

/// Output of the [`Summary`] [`Query`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Output {
    /// Total count of [`Review`]s left on the platform.
    pub reviews: read::review::list::TotalCount,

    /// Average [`review::Rating`] across all the [`Review`]s.
    pub average_rating: read::review::AverageRating,

    /// Total count of business [`Profile`]s.
    pub businesses: read::profile::list::TotalCount,

    /// Total count of [`Offer`]s.
    pub offers: read::offer::list::TotalCount,
}

impl<Db> Query<Summary> for Service<Db>
where
    Db: Database<
            Select<By<read::review::list::TotalCount, ()>>,
            Ok = read::review::list::TotalCount,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<read::review::AverageRating, ()>>,
            Ok = read::review::AverageRating,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<read::profile::list::TotalCount, profile::Kind>>,
            Ok = read::profile::list::TotalCount,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<read::offer::list::TotalCount, ()>>,
            Ok = read::offer::list::TotalCount,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Output;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Summary) -> Result<Self::Ok, Self::Err> {
        let reviews = self
            .database()
            .execute(Select(By::<read::review::list::TotalCount, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;

        let average_rating = self
            .database()
            .execute(Select(By::<read::review::AverageRating, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;

        let businesses = self
            .database()
            .execute(Select(By::<read::profile::list::TotalCount, _>::new(
                profile::Kind::Business,
            )))
            .await
            .map_err(tracerr::wrap!())?;

        let offers = self
            .database()
            .execute(Select(By::<read::offer::list::TotalCount, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;

        Ok(Output {
            reviews,
            average_rating,
            businesses,
            offers,
        })
    }
}
