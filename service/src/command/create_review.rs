//! [`Command`] for creating a new [`Review`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::{profile, review, user, Profile, Review},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Review`] of a business [`User`].
///
/// The reviewer must own a [`profile::Kind::Customer`] [`Profile`], the
/// reviewed [`User`] a [`profile::Kind::Business`] one, and at most one
/// [`Review`] may exist per (reviewer, business) pair.
#[derive(Clone, Debug)]
pub struct CreateReview {
    /// ID of the [`User`] leaving the [`Review`].
    pub reviewer_id: user::Id,

    /// ID of the business [`User`] being reviewed.
    pub business_id: user::Id,

    /// [`review::Rating`] given to the business [`User`].
    pub rating: review::Rating,

    /// [`review::Comment`] accompanying the [`review::Rating`].
    pub comment: review::Comment,
}

impl<Db> Command<CreateReview> for Service<Db>
where
    Db: Database<
            Select<By<Option<Profile>, user::Id>>,
            Ok = Option<Profile>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Review>, (user::Id, user::Id)>>,
            Ok = Option<Review>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Review>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Review;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateReview) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateReview {
            reviewer_id,
            business_id,
            rating,
            comment,
        } = cmd;

        let reviewer = self
            .database()
            .execute(Select(By::<Option<Profile>, _>::new(reviewer_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ProfileNotExists(reviewer_id))
            .map_err(tracerr::wrap!())?;
        if reviewer.kind != profile::Kind::Customer {
            return Err(tracerr::new!(E::ReviewerNotCustomer(reviewer_id)));
        }

        let business = self
            .database()
            .execute(Select(By::<Option<Profile>, _>::new(business_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ProfileNotExists(business_id))
            .map_err(tracerr::wrap!())?;
        if business.kind != profile::Kind::Business {
            return Err(tracerr::new!(E::UserNotBusiness(business_id)));
        }

        let existing = self
            .database()
            .execute(Select(By::<Option<Review>, _>::new((
                reviewer_id,
                business_id,
            ))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if existing.is_some() {
            return Err(tracerr::new!(E::AlreadyReviewed(
                reviewer_id,
                business_id,
            )));
        }

        let now = DateTime::now();
        let review = Review {
            id: review::Id::new(),
            business_id,
            reviewer_id,
            rating,
            comment,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(review.clone()))
            .await
            .map_err(|e| {
                // Race losers slip past the pre-check and hit the `UNIQUE`
                // constraint instead.
                if e.as_ref()
                    .is_unique_violation(Some("reviews_one_per_pair"))
                {
                    tracerr::new!(E::AlreadyReviewed(reviewer_id, business_id))
                } else {
                    tracerr::map_from(e)
                }
            })
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(review)
    }
}

/// Error of [`CreateReview`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Review`] of the business [`User`] by this reviewer exists already.
    #[display("`User(id: {_0})` has reviewed `User(id: {_1})` already")]
    AlreadyReviewed(
        #[error(not(source))] user::Id,
        #[error(not(source))] user::Id,
    ),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Profile`] doesn't exist.
    #[display("`Profile(user_id: {_0})` does not exist")]
    ProfileNotExists(#[error(not(source))] user::Id),

    /// Reviewer [`User`] is not a customer.
    #[display("`User(id: {_0})` is not a customer")]
    ReviewerNotCustomer(#[error(not(source))] user::Id),

    /// Reviewed [`User`] is not a business.
    #[display("`User(id: {_0})` is not a business")]
    UserNotBusiness(#[error(not(source))] user::Id),
}
