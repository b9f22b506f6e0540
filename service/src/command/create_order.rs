//! [`Command`] for creating a new [`Order`].

use common::{
    operations::{By, Commit, Insert, Lock, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::{
        offer::{self, detail, Detail},
        order, profile, user, Offer, Order, Profile,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Order`] of a single [`Detail`].
///
/// The created [`Order`] snapshots the current [`Detail`]'s price, so won't
/// be affected by its later edits.
#[derive(Clone, Copy, Debug)]
pub struct CreateOrder {
    /// ID of the customer [`User`] placing the [`Order`].
    pub customer_id: user::Id,

    /// ID of the [`Detail`] to be ordered.
    pub detail_id: detail::Id,
}

impl<Db> Command<CreateOrder> for Service<Db>
where
    Db: Database<
            Select<By<Option<Profile>, user::Id>>,
            Ok = Option<Profile>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Detail>, detail::Id>>,
            Ok = Option<Detail>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Offer>, offer::Id>>,
            Ok = Option<Offer>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Detail, detail::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Insert<Order>, Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Order;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateOrder) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateOrder {
            customer_id,
            detail_id,
        } = cmd;

        let kind = self
            .database()
            .execute(Select(By::<Option<Profile>, _>::new(customer_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ProfileNotExists(customer_id))
            .map_err(tracerr::wrap!())?
            .kind;
        if kind != profile::Kind::Customer {
            return Err(tracerr::new!(E::UserNotCustomer(customer_id)));
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Keep the price snapshot consistent with the `Detail` being ordered.
        tx.execute(Lock(By::new(detail_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let detail = tx
            .execute(Select(By::<Option<Detail>, _>::new(detail_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::DetailNotExists(detail_id))
            .map_err(tracerr::wrap!())?;
        let offer = tx
            .execute(Select(By::<Option<Offer>, _>::new(detail.offer_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OfferNotExists(detail.offer_id))
            .map_err(tracerr::wrap!())?;

        let now = DateTime::now();
        let order = Order {
            id: order::Id::new(),
            customer_id,
            business_id: offer.owner_id,
            detail_id,
            price: detail.price,
            status: order::Status::InProgress,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };

        tx.execute(Insert(order.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(order)
    }
}

/// Error of [`CreateOrder`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Detail`] doesn't exist.
    #[display("`Detail(id: {_0})` does not exist")]
    #[from(ignore)]
    DetailNotExists(#[error(not(source))] detail::Id),

    /// [`Offer`] of the [`Detail`] doesn't exist.
    #[display("`Offer(id: {_0})` does not exist")]
    #[from(ignore)]
    OfferNotExists(#[error(not(source))] offer::Id),

    /// [`Profile`] of the [`User`] doesn't exist.
    #[display("`Profile(user_id: {_0})` does not exist")]
    #[from(ignore)]
    ProfileNotExists(#[error(not(source))] user::Id),

    /// [`User`] is not a customer one.
    #[display("`User(id: {_0})` is not a customer `User`")]
    #[from(ignore)]
    UserNotCustomer(#[error(not(source))] user::Id),
}
