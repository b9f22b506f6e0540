//! GraphQL [`Subscription`]s definitions.

use std::time::Duration;

use futures::{
    stream::{self, BoxStream},
    StreamExt as _,
};
use juniper::graphql_subscription;
use service::{query, Query as _};

use crate::{api, define_error, AsError, Context, Error};

/// Period of polling an `Order` for its `OrderStatus` changes.
const POLL_PERIOD: Duration = Duration::from_secs(1);

/// Root of all GraphQL subscriptions.
#[derive(Clone, Copy, Debug)]
pub struct Subscription;

#[graphql_subscription(context = Context)]
impl Subscription {
    /// Subscription to `OrderStatus` changes of the `Order` with the
    /// provided ID.
    ///
    /// Immediately emits the current `OrderStatus`, then emits it on every
    /// change, and completes once a terminal `OrderStatus` has been emitted.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_PARTICIPANT` - the authenticated `User` is not a party of the
    ///                       `Order`;
    /// - `ORDER_NOT_EXISTS` - the `Order` with the specified ID does not
    ///                        exist.
    pub async fn order_status(
        &self,
        id: api::order::Id,
        ctx: &Context,
    ) -> Result<BoxStream<'static, Result<api::order::Status, Error>>, Error>
    {
        let my_id = ctx.current_session().await?.user_id;

        let order = ctx
            .service()
            .execute(query::order::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| OrderError::NotExists.into())
            .map_err(ctx.error())?;
        if api::user::Id::from(order.customer_id) != my_id
            && api::user::Id::from(order.business_id) != my_id
        {
            return Err(api::PrivilegeError::Participant.into())
                .map_err(ctx.error());
        }

        let service = ctx.service().clone();
        let changes = stream::unfold(
            (service, order.id, order.status),
            |(service, id, last)| async move {
                if last.is_terminal() {
                    return None;
                }
                loop {
                    tokio::time::sleep(POLL_PERIOD).await;
                    let status = match service
                        .execute(query::order::ById::by(id))
                        .await
                    {
                        Ok(Some(order)) => order.status,
                        Ok(None) => return None,
                        Err(e) => {
                            return Some((
                                Err(e.into_error()),
                                (service, id, last),
                            ));
                        }
                    };
                    if status != last {
                        return Some((
                            Ok(status.into()),
                            (service, id, status),
                        ));
                    }
                }
            },
        );
        Ok(stream::iter([Ok(order.status.into())]).chain(changes).boxed())
    }
}

define_error! {
    enum OrderError {
        #[code = "ORDER_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Order` with the specified ID does not exist"]
        NotExists,
    }
}
