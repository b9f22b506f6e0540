//! [`Command`] for deleting an [`Offer`].

use common::operations::{
    By, Commit, Delete, Lock, Select, Transact, Transacted,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{offer::Detail, Order, User};
use crate::{
    domain::{offer, user, Offer},
    infra::{database, Database},
    read,
    Service,
};

use super::Command;

/// [`Command`] for deleting an [`Offer`] along with its [`Detail`]s.
///
/// Denied while any [`Order`] references a [`Detail`] of the [`Offer`].
#[derive(Clone, Copy, Debug)]
pub struct DeleteOffer {
    /// ID of the [`User`] deleting the [`Offer`].
    pub initiator_id: user::Id,

    /// ID of the [`Offer`] to be deleted.
    pub offer_id: offer::Id,
}

impl<Db> Command<DeleteOffer> for Service<Db>
where
    Db: Database<
            Select<By<Option<Offer>, offer::Id>>,
            Ok = Option<Offer>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<read::order::list::TotalCount, offer::Id>>,
            Ok = read::order::list::TotalCount,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Offer, offer::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Offer, offer::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteOffer) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteOffer {
            initiator_id,
            offer_id,
        } = cmd;

        let offer = self
            .database()
            .execute(Select(By::<Option<Offer>, _>::new(offer_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OfferNotExists(offer_id))
            .map_err(tracerr::wrap!())?;
        if offer.owner_id != initiator_id {
            return Err(tracerr::new!(E::NotOwner(initiator_id)));
        }

        let ordered = self
            .database()
            .execute(Select(
                By::<read::order::list::TotalCount, _>::new(offer_id),
            ))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if i32::from(ordered) > 0 {
            return Err(tracerr::new!(E::OrdersExist(offer_id)));
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Offer`.
        tx.execute(Lock(By::new(offer_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Delete(By::<Offer, _>::new(offer_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(())
    }
}

/// Error of [`DeleteOffer`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`User`] doesn't own the deleted [`Offer`].
    #[display("`User(id: {_0})` doesn't own the deleted `Offer`")]
    #[from(ignore)]
    NotOwner(#[error(not(source))] user::Id),

    /// [`Offer`] doesn't exist.
    #[display("`Offer(id: {_0})` does not exist")]
    #[from(ignore)]
    OfferNotExists(#[error(not(source))] offer::Id),

    /// [`Order`]s reference [`Detail`]s of the [`Offer`].
    #[display("`Offer(id: {_0})` has `Order`s referencing its `Detail`s")]
    #[from(ignore)]
    OrdersExist(#[error(not(source))] offer::Id),
}
