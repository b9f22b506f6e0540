//! [`Command`] for deleting a [`Review`].

use common::operations::{
    By, Commit, Delete, Lock, Select, Transact, Transacted,
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

/// [`Command`] for deleting a [`Review`].
///
/// Only the [`User`] who left the [`Review`] may delete it.
#[derive(Clone, Copy, Debug)]
pub struct DeleteReview {
    /// ID of the [`User`] deleting the [`Review`].
    pub initiator_id: user::Id,

    /// ID of the [`Review`] to be deleted.
    pub review_id: review::Id,
}

impl<Db> Command<DeleteReview> for Service<Db>
where
    Db: Database<
            Select<By<Option<Review>, review::Id>>,
            Ok = Option<Review>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Review, review::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Review, review::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteReview) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteReview {
            initiator_id,
            review_id,
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

        tx.execute(Delete(By::<Review, _>::new(review_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(())
    }
}

/// Error of [`DeleteReview`] [`Command`] execution.
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
