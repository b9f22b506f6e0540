//! GraphQL [`Query`]s definitions.

use common::{pagination, Price};
use itertools::Itertools as _;
use juniper::graphql_object;
use service::{domain, query, read, Query as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns the currently authenticated `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myUser",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_user(ctx: &Context) -> Result<api::User, Error> {
        let my_id = ctx.current_session().await?.user_id;
        ctx.service()
            .execute(query::user::ById::by(my_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| UserError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Profile` of the currently authenticated `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myProfile",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_profile(ctx: &Context) -> Result<api::Profile, Error> {
        let my_id = ctx.current_session().await?.user_id;
        ctx.service()
            .execute(query::profile::ById::by(my_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| ProfileError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Profile` of the `User` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PROFILE_NOT_EXISTS` - the `Profile` of the `User` with the
    ///                          specified ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            user_id = %user_id,
            gql.name = "profile",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn profile(
        user_id: api::user::Id,
        ctx: &Context,
    ) -> Result<api::profile::list::Edge, Error> {
        Self::profiles(
            None,
            Some(user_id.into()),
            None,
            Some(user_id.into()),
            None,
            ctx,
        )
        .await?
        .edges()
        .into_iter()
        .exactly_one()
        .map_err(|_| ProfileError::NotExists.into())
        .map_err(ctx.error())
    }

    /// Fetches the page of `Profile`s.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AMBIGUOUS_PAGINATION_ARGUMENTS` - the pagination arguments are
    ///                                      ambiguous.
    #[tracing::instrument(
        skip_all,
        fields(
            after = ?after,
            before = ?before,
            first = ?first,
            gql.name = "profiles",
            kind = ?kind,
            last = ?last,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn profiles(
        first: Option<i32>,
        after: Option<api::profile::list::Cursor>,
        last: Option<i32>,
        before: Option<api::profile::list::Cursor>,
        kind: Option<api::profile::Kind>,
        ctx: &Context,
    ) -> Result<api::profile::list::Connection, Error> {
        const DEFAULT_PAGE_SIZE: i32 = 10;

        _ = ctx.current_session().await?;

        ctx.service()
            .execute(query::profiles::List::by(
                read::profile::list::Selector {
                    arguments: read::profile::list::Arguments::new(
                        first,
                        after.map(Into::into),
                        last,
                        before.map(Into::into),
                        DEFAULT_PAGE_SIZE,
                    )
                    .ok_or_else(|| api::PaginationError::Ambiguous.into())
                    .map_err(ctx.error())?,
                    filter: read::profile::list::Filter {
                        kind: kind.map(Into::into),
                    },
                },
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Offer` with the specified ID.
    ///
    /// Available without authentication.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `OFFER_NOT_EXISTS` - the `Offer` with the specified ID does not
    ///                        exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "offer",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn offer(
        id: api::offer::Id,
        ctx: &Context,
    ) -> Result<api::offer::list::Edge, Error> {
        Self::offers(
            None,
            Some(id.into()),
            None,
            Some(id.into()),
            None,
            None,
            None,
            None,
            None,
            None,
            ctx,
        )
        .await?
        .edges()
        .into_iter()
        .exactly_one()
        .map_err(|_| OfferError::NotExists.into())
        .map_err(ctx.error())
    }

    /// Fetches the page of `Offer`s.
    ///
    /// Available without authentication. Sorted by the last update time
    /// descending, unless `sortBy` or `direction` say otherwise.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AMBIGUOUS_PAGINATION_ARGUMENTS` - the pagination arguments are
    ///                                      ambiguous;
    /// - `INVALID_DELIVERY_TIME` - the `maxDeliveryTime` is not a
    ///                             non-negative number of days.
    #[tracing::instrument(
        skip_all,
        fields(
            after = ?after,
            before = ?before,
            direction = ?direction,
            first = ?first,
            gql.name = "offers",
            last = ?last,
            max_delivery_time = ?max_delivery_time,
            min_price = ?min_price.as_ref().map(ToString::to_string),
            otel.name = Self::SPAN_NAME,
            owner_id = ?owner_id.as_ref().map(ToString::to_string),
            search = ?search.as_ref().map(ToString::to_string),
            sort_by = ?sort_by,
        ),
    )]
    #[expect(clippy::too_many_arguments, reason = "still readable")]
    pub async fn offers(
        first: Option<i32>,
        after: Option<api::offer::list::Cursor>,
        last: Option<i32>,
        before: Option<api::offer::list::Cursor>,
        owner_id: Option<api::user::Id>,
        min_price: Option<Price>,
        max_delivery_time: Option<i32>,
        search: Option<api::offer::Title>,
        sort_by: Option<api::offer::SortBy>,
        direction: Option<api::SortDirection>,
        ctx: &Context,
    ) -> Result<api::offer::list::Connection, Error> {
        const DEFAULT_PAGE_SIZE: i32 = 10;

        let max_delivery_time = max_delivery_time
            .map(|num| {
                domain::offer::detail::DeliveryTime::new(num).ok_or_else(
                    || {
                        api::offer::detail::DetailError::InvalidDeliveryTime
                            .into()
                    },
                )
            })
            .transpose()
            .map_err(ctx.error())?;

        ctx.service()
            .execute(query::offers::List::by(read::offer::list::Selector {
                arguments: read::offer::list::Arguments::new(
                    first,
                    after.map(Into::into),
                    last,
                    before.map(Into::into),
                    DEFAULT_PAGE_SIZE,
                )
                .ok_or_else(|| api::PaginationError::Ambiguous.into())
                .map_err(ctx.error())?,
                filter: read::offer::list::Filter {
                    owner: owner_id.map(Into::into),
                    min_price,
                    max_delivery_time,
                    search: search.map(Into::into),
                },
                sorting: read::offer::list::Sorting {
                    by: sort_by.map(Into::into).unwrap_or_default(),
                    order: direction
                        .map_or(pagination::Order::Descending, Into::into),
                },
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `OfferDetail` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `OFFER_DETAIL_NOT_EXISTS` - the `OfferDetail` with the specified ID
    ///                               does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "offerDetail",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn offer_detail(
        id: api::offer::detail::Id,
        ctx: &Context,
    ) -> Result<api::offer::detail::Detail, Error> {
        _ = ctx.current_session().await?;

        ctx.service()
            .execute(query::offer::DetailById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| OfferDetailError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Order` with the specified ID.
    ///
    /// Only a party of the `Order` may see it.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ORDER_NOT_EXISTS` - the `Order` with the specified ID does not
    ///                        exist;
    /// - `NOT_PARTICIPANT` - the current `User` is not a party of the
    ///                       `Order`.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "order",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn order(
        id: api::order::Id,
        ctx: &Context,
    ) -> Result<api::Order, Error> {
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

        Ok(order.into())
    }

    /// Fetches the page of the current `User`'s `Order`s.
    ///
    /// Lists the `Order`s the current `User` participates in, either as the
    /// customer or as the business party.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AMBIGUOUS_PAGINATION_ARGUMENTS` - the pagination arguments are
    ///                                      ambiguous.
    #[tracing::instrument(
        skip_all,
        fields(
            after = ?after,
            before = ?before,
            first = ?first,
            gql.name = "orders",
            last = ?last,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn orders(
        first: Option<i32>,
        after: Option<api::order::list::Cursor>,
        last: Option<i32>,
        before: Option<api::order::list::Cursor>,
        ctx: &Context,
    ) -> Result<api::order::list::Connection, Error> {
        const DEFAULT_PAGE_SIZE: i32 = 10;

        let my_id = ctx.current_session().await?.user_id;
        ctx.service()
            .execute(query::orders::List::by(read::order::list::Selector {
                arguments: read::order::list::Arguments::new(
                    first,
                    after.map(Into::into),
                    last,
                    before.map(Into::into),
                    DEFAULT_PAGE_SIZE,
                )
                .ok_or_else(|| api::PaginationError::Ambiguous.into())
                .map_err(ctx.error())?,
                filter: read::order::list::Filter {
                    party: Some(my_id.into()),
                },
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Order` counts of the business `User` with the specified
    /// ID.
    ///
    /// Counts only the `Order`s where the `User` acts as the business party.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PROFILE_NOT_EXISTS` - the `User` with the specified ID does not
    ///                          have a business `Profile`.
    #[tracing::instrument(
        skip_all,
        fields(
            business_user_id = %business_user_id,
            gql.name = "orderCounts",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn order_counts(
        business_user_id: api::user::Id,
        ctx: &Context,
    ) -> Result<api::order::Counts, Error> {
        _ = ctx.current_session().await?;

        let profile = ctx
            .service()
            .execute(query::profile::ById::by(business_user_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| ProfileError::NotExists.into())
            .map_err(ctx.error())?;
        if profile.kind != domain::profile::Kind::Business {
            return Err(ProfileError::NotExists.into()).map_err(ctx.error());
        }

        ctx.service()
            .execute(query::order::Counts::by(business_user_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Review` with the specified ID.
    ///
    /// Only the `User` who left the `Review` may fetch it by ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `REVIEW_NOT_EXISTS` - the `Review` with the specified ID does not
    ///                         exist;
    /// - `NOT_OWNER` - the current `User` is not the reviewer.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "review",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn review(
        id: api::review::Id,
        ctx: &Context,
    ) -> Result<api::Review, Error> {
        let my_id = ctx.current_session().await?.user_id;
        let review = ctx
            .service()
            .execute(query::review::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| ReviewError::NotExists.into())
            .map_err(ctx.error())?;
        if api::user::Id::from(review.reviewer_id) != my_id {
            return Err(api::PrivilegeError::Owner.into())
                .map_err(ctx.error());
        }

        Ok(review.into())
    }

    /// Fetches the page of `Review`s.
    ///
    /// Sorted by the last update time descending, unless `sortBy` or
    /// `direction` say otherwise.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AMBIGUOUS_PAGINATION_ARGUMENTS` - the pagination arguments are
    ///                                      ambiguous.
    #[tracing::instrument(
        skip_all,
        fields(
            after = ?after,
            before = ?before,
            business_user_id =
                ?business_user_id.as_ref().map(ToString::to_string),
            direction = ?direction,
            first = ?first,
            gql.name = "reviews",
            last = ?last,
            otel.name = Self::SPAN_NAME,
            reviewer_id = ?reviewer_id.as_ref().map(ToString::to_string),
            sort_by = ?sort_by,
        ),
    )]
    #[expect(clippy::too_many_arguments, reason = "still readable")]
    pub async fn reviews(
        first: Option<i32>,
        after: Option<api::review::list::Cursor>,
        last: Option<i32>,
        before: Option<api::review::list::Cursor>,
        business_user_id: Option<api::user::Id>,
        reviewer_id: Option<api::user::Id>,
        sort_by: Option<api::review::SortBy>,
        direction: Option<api::SortDirection>,
        ctx: &Context,
    ) -> Result<api::review::list::Connection, Error> {
        const DEFAULT_PAGE_SIZE: i32 = 10;

        _ = ctx.current_session().await?;

        ctx.service()
            .execute(query::reviews::List::by(read::review::list::Selector {
                arguments: read::review::list::Arguments::new(
                    first,
                    after.map(Into::into),
                    last,
                    before.map(Into::into),
                    DEFAULT_PAGE_SIZE,
                )
                .ok_or_else(|| api::PaginationError::Ambiguous.into())
                .map_err(ctx.error())?,
                filter: read::review::list::Filter {
                    business: business_user_id.map(Into::into),
                    reviewer: reviewer_id.map(Into::into),
                },
                sorting: read::review::list::Sorting {
                    by: sort_by.map(Into::into).unwrap_or_default(),
                    order: direction
                        .map_or(pagination::Order::Descending, Into::into),
                },
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the platform-wide statistics.
    ///
    /// Available without authentication.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "platformSummary",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn platform_summary(
        ctx: &Context,
    ) -> Result<api::stats::Summary, Error> {
        ctx.service()
            .execute(query::stats::Summary)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

define_error! {
    enum OfferDetailError {
        #[code = "OFFER_DETAIL_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`OfferDetail` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum OfferError {
        #[code = "OFFER_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Offer` with the specified ID does not exist"]
        NotExists,
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

define_error! {
    enum ProfileError {
        #[code = "PROFILE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Profile` of the specified `User` does not exist"]
        NotExists,
    }
}

define_error! {
    enum ReviewError {
        #[code = "REVIEW_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Review` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum UserError {
        #[code = "USER_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`User` with the specified ID does not exist"]
        NotExists,
    }
}
