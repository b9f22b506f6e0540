//! [`Order`]-related definitions.

use std::future;

use common::{DateTime, Price};
use derive_more::{Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLEnum, GraphQLObject, GraphQLScalar};
use service::{domain, query, read, Query};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{api, AsError, Context, Error};

/// A purchase of an `OfferDetail` by a customer `User`.
#[derive(Clone, Debug)]
pub struct Order {
    /// ID of this [`Order`].
    id: Id,

    /// Underlying [`domain::Order`].
    order: OnceCell<domain::Order>,

    /// Customer `User` party of this [`Order`].
    customer: OnceCell<api::User>,

    /// Business `User` party of this [`Order`].
    business: OnceCell<api::User>,

    /// `OfferDetail` this [`Order`] was created for.
    detail: OnceCell<api::offer::detail::Detail>,
}

impl From<domain::Order> for Order {
    fn from(order: domain::Order) -> Self {
        Self {
            id: order.id.into(),
            order: OnceCell::new_with(Some(order)),
            customer: OnceCell::new(),
            business: OnceCell::new(),
            detail: OnceCell::new(),
        }
    }
}

impl Order {
    /// Creates a new [`Order`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Order`] with the provided ID exists,
    /// otherwise accessing this [`Order`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            order: OnceCell::new(),
            customer: OnceCell::new(),
            business: OnceCell::new(),
            detail: OnceCell::new(),
        }
    }

    /// Returns the underlying [`domain::Order`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Order`] doesn't exist.
    async fn order(&self, ctx: &Context) -> Result<&domain::Order, Error> {
        let id = self.id.into();
        self.order
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::order::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|o| {
                        future::ready(o.ok_or_else(|| {
                            api::query::OrderError::NotExists.into()
                        }))
                    })
            })
            .await
    }
}

/// A purchase of an `OfferDetail` by a customer `User`.
#[graphql_object(context = Context)]
impl Order {
    /// Unique identifier of this `Order`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Customer `User` party of this `Order`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.customer",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn customer(&self, ctx: &Context) -> Result<&api::User, Error> {
        let id = self.order(ctx).await?.customer_id;
        self.customer
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::user::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|u| {
                        future::ready(u.map_or_else(
                            || Err(api::query::UserError::NotExists.into()),
                            |u| Ok(u.into()),
                        ))
                    })
            })
            .await
    }

    /// Business `User` party of this `Order`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.business",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn business(&self, ctx: &Context) -> Result<&api::User, Error> {
        let id = self.order(ctx).await?.business_id;
        self.business
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::user::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|u| {
                        future::ready(u.map_or_else(
                            || Err(api::query::UserError::NotExists.into()),
                            |u| Ok(u.into()),
                        ))
                    })
            })
            .await
    }

    /// `OfferDetail` this `Order` was created for.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.detail",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn detail(
        &self,
        ctx: &Context,
    ) -> Result<&api::offer::detail::Detail, Error> {
        let id = self.order(ctx).await?.detail_id;
        self.detail
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::offer::DetailById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|d| {
                        future::ready(d.map_or_else(
                            || {
                                Err(api::query::OfferDetailError::NotExists
                                    .into())
                            },
                            |d| Ok(d.into()),
                        ))
                    })
            })
            .await
    }

    /// `Price` of the `OfferDetail` at the moment this `Order` was created.
    ///
    /// Later `OfferDetail` price changes don't affect it.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.price",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn price(&self, ctx: &Context) -> Result<Price, Error> {
        Ok(self.order(ctx).await?.price)
    }

    /// Status of this `Order`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.status",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn status(&self, ctx: &Context) -> Result<Status, Error> {
        Ok(self.order(ctx).await?.status.into())
    }

    /// `DateTime` when this `Order` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.order(ctx).await?.created_at.coerce())
    }

    /// `DateTime` when this `Order` was updated the last time.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.updatedAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn updated_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.order(ctx).await?.updated_at.coerce())
    }
}

/// Unique identifier of an `Order`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::order::Id)]
#[into(domain::order::Id)]
#[graphql(name = "OrderId", transparent)]
pub struct Id(Uuid);

/// Status of an `Order`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "OrderStatus")]
pub enum Status {
    /// `Order` has been placed and is being worked on.
    InProgress,

    /// `Order` has been fulfilled by the business `User`.
    Completed,

    /// `Order` has been cancelled.
    Cancelled,
}

impl From<domain::order::Status> for Status {
    fn from(status: domain::order::Status) -> Self {
        use domain::order::Status as S;
        match status {
            S::InProgress => Self::InProgress,
            S::Completed => Self::Completed,
            S::Cancelled => Self::Cancelled,
        }
    }
}

impl From<Status> for domain::order::Status {
    fn from(status: Status) -> Self {
        match status {
            Status::InProgress => Self::InProgress,
            Status::Completed => Self::Completed,
            Status::Cancelled => Self::Cancelled,
        }
    }
}

/// Counts of `Order`s a business `User` is a party of.
#[derive(Clone, Copy, Debug, From, GraphQLObject)]
#[graphql(context = Context, name = "OrderCounts")]
pub struct Counts {
    /// Number of `Order`s being in progress.
    pub in_progress: i32,

    /// Number of completed `Order`s.
    pub completed: i32,
}

impl From<read::order::Counts> for Counts {
    fn from(counts: read::order::Counts) -> Self {
        let read::order::Counts {
            in_progress,
            completed,
        } = counts;
        Self {
            in_progress,
            completed,
        }
    }
}

pub mod list {
    //! Definitions related to the [`Order`] list.

    use derive_more::{AsRef, From, Into};
    use juniper::{graphql_object, GraphQLScalar};
    use service::{query, read, Query as _};

    use crate::{api::scalar, AsError, Context, Error};

    use super::{Id, Order};

    /// Cursor for the `Order` list.
    #[derive(AsRef, Clone, Copy, Debug, From, GraphQLScalar, Into)]
    #[from(Id, read::order::list::Cursor)]
    #[graphql(
        name = "OrderListCursor",
        with = scalar::Via::<read::order::list::Cursor>,
    )]
    pub struct Cursor(pub read::order::list::Cursor);

    /// Edge in the [`Order`] list.
    #[derive(Clone, Copy, Debug, From, Into)]
    pub struct Edge(read::order::list::Edge);

    /// Edge in the `Order` list.
    #[graphql_object(name = "OrderListEdge", context = Context)]
    impl Edge {
        /// Cursor of this `OrderListEdge`.
        #[must_use]
        pub fn cursor(&self) -> Cursor {
            self.0.cursor.into()
        }

        /// Node of this `OrderListEdge`.
        #[must_use]
        pub fn node(&self) -> Order {
            #[expect(
                unsafe_code,
                reason = "`Edge` loaded from repository guarantees `Order` \
                          existence"
            )]
            unsafe {
                Order::new_unchecked(self.0.node)
            }
        }
    }

    /// Connection of the [`Order`] list.
    #[derive(Clone, Debug, From, Into)]
    pub struct Connection(read::order::list::Connection);

    /// Connection of the `Order` list.
    #[graphql_object(name = "OrderListConnection", context = Context)]
    impl Connection {
        /// Edges in this `OrderListConnection`.
        #[must_use]
        pub fn edges(&self) -> Vec<Edge> {
            self.0.edges.iter().copied().map(Into::into).collect()
        }

        /// Information about the page.
        #[must_use]
        pub fn page_info(&self) -> PageInfo {
            PageInfo {
                info: self.0.page_info(),
                start_cursor: self.0.edges.first().map(|e| e.cursor.into()),
                end_cursor: self.0.edges.last().map(|e| e.cursor.into()),
            }
        }
    }

    /// Information about a [`Connection`] page.
    #[derive(Clone, Copy, Debug)]
    pub struct PageInfo {
        /// Underlying [`read::order::list::PageInfo`].
        info: read::order::list::PageInfo,

        /// Start cursor of the page.
        start_cursor: Option<Cursor>,

        /// End cursor of the page.
        end_cursor: Option<Cursor>,
    }

    /// Information about an `OrderListConnection` page.
    #[graphql_object(name = "OrderListPageInfo", context = Context)]
    impl PageInfo {
        /// Indicator whether there is a next page.
        #[must_use]
        pub fn has_next_page(&self) -> bool {
            self.info.has_next_page
        }

        /// Indicator whether there is a previous page.
        #[must_use]
        pub fn has_previous_page(&self) -> bool {
            self.info.has_previous_page
        }

        /// Start cursor of the page.
        #[must_use]
        pub fn start_cursor(&self) -> &Option<Cursor> {
            &self.start_cursor
        }

        /// End cursor of the page.
        #[must_use]
        pub fn end_cursor(&self) -> &Option<Cursor> {
            &self.end_cursor
        }

        /// Total count of `Order`s the authenticated `User` participates in.
        pub async fn total_count(&self, ctx: &Context) -> Result<i32, Error> {
            let my_id = ctx.current_session().await?.user_id;

            ctx.service()
                .execute(query::orders::TotalCount::by(my_id.into()))
                .await
                .map_err(AsError::into_error)
                .map_err(ctx.error())
                .map(Into::into)
        }
    }
}
