//! [`Command`] for updating a [`Review`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::{review, user, Review},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating a [`Review`].
///
/// Only the [`User`] who left the [`Review`] may update it. Every [`None`]
/// field is left unchanged.
#[derive(Clone, Debug)]
pub struct UpdateReview {
    /// ID of the [`User`] updating the [`Review`].
    pub initiator_id: user::Id,

    /// ID of the [`Review`] to be updated.
    pub review_id: review::Id,

    /// New [`review::Rating`] of the [`Review`].
    pub rating: Option<review::Rating>,

    /// New [`review::Comment`] of the [`Review`].
    pub comment: Option<review::Comment>,
}

impl<Db> Command<UpdateReview> for Service<Db>
where
    Db: Database<
            Select<By<Option<Review>, review::Id>>,
            Ok = Option<Review>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Review>, review::Id>>,
            Ok = Option<Review>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Review, review::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Update<Review>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Review;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateReview) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateReview {
            initiator_id,
            review_id,
            rating,
            comment,
        } = cmd;

        let review = self
            .database()
            .execute(Select(By::<Option<Review>, _>::new(review_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ReviewNotExists(review_id))
            .map_err(tracerr::wrap!())?;
        if review.reviewer_id != initiator_id {
            return Err(tracerr::new!(E::NotReviewer(initiator_id)));
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Review`.
        tx.execute(Lock(By::new(review_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut review = tx
            .execute(Select(By::<Option<Review>, _>::new(review_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ReviewNotExists(review_id))
            .map_err(tracerr::wrap!())?;

        if let Some(rating) = rating {
            review.rating = rating;
        }
        if let Some(comment) = comment {
            review.comment = comment;
        }
        review.updated_at = DateTime::now().coerce();

        tx.execute(Update(review.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(review)
    }
}

/// Error of [`UpdateReview`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`User`] didn't leave the [`Review`].
    #[display("`User(id: {_0})` is not the reviewer of the `Review`")]
    #[from(ignore)]
    NotReviewer(#[error(not(source))] user::Id),

    /// [`Review`] doesn't exist.
    #[display("`Review(id: {_0})` does not exist")]
    #[from(ignore)]
    ReviewNotExists(#[error(not(source))] review::Id),
}
