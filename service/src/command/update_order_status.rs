//! [`Command`] for updating an [`Order`]'s [`Status`].
//!
//! [`Status`]: order::Status

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::{order, user, Order},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for moving an [`Order`] into another [`order::Status`].
///
/// Only the business party of the [`Order`] may do this, and only the
/// transitions allowed by [`order::Status::may_become()`] are accepted.
#[derive(Clone, Copy, Debug)]
pub struct UpdateOrderStatus {
    /// ID of the [`User`] updating the [`Order`].
    pub initiator_id: user::Id,

    /// ID of the [`Order`] to be updated.
    pub order_id: order::Id,

    /// [`order::Status`] to move the [`Order`] into.
    pub status: order::Status,
}

impl<Db> Command<UpdateOrderStatus> for Service<Db>
where
    Db: Database<
            Select<By<Option<Order>, order::Id>>,
            Ok = Option<Order>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Order>, order::Id>>,
            Ok = Option<Order>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Order, order::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Update<Order>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Order;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateOrderStatus,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateOrderStatus {
            initiator_id,
            order_id,
            status,
        } = cmd;

        let order = self
            .database()
            .execute(Select(By::<Option<Order>, _>::new(order_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OrderNotExists(order_id))
            .map_err(tracerr::wrap!())?;
        if order.business_id != initiator_id {
            return Err(tracerr::new!(E::NotBusinessParty(initiator_id)));
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid racing transitions of the same `Order`.
        tx.execute(Lock(By::new(order_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut order = tx
            .execute(Select(By::<Option<Order>, _>::new(order_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OrderNotExists(order_id))
            .map_err(tracerr::wrap!())?;

        if !order.status.may_become(status) {
            return Err(tracerr::new!(E::UnreachableStatus(
                order.status,
                status,
            )));
        }

        order.status = status;
        order.updated_at = DateTime::now().coerce();

        tx.execute(Update(order.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(order)
    }
}

/// Error of [`UpdateOrderStatus`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`User`] is not the business party of the [`Order`].
    #[display("`User(id: {_0})` is not the business party of the `Order`")]
    #[from(ignore)]
    NotBusinessParty(#[error(not(source))] user::Id),

    /// [`Order`] doesn't exist.
    #[display("`Order(id: {_0})` does not exist")]
    #[from(ignore)]
    OrderNotExists(#[error(not(source))] order::Id),

    /// [`Order`] cannot move into the requested [`order::Status`].
    #[display("`Order` status cannot move from {_0} to {_1}")]
    #[from(ignore)]
    UnreachableStatus(
        #[error(not(source))] order::Status,
        #[error(not(source))] order::Status,
    ),
}
