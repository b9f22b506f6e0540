//! [`Review`]-related definitions.

use std::future;

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::{domain, query, read, Query};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    define_error, AsError, Context, Error,
};

/// Feedback left by a customer `User` about a business `User`.
#[derive(Clone, Debug)]
pub struct Review {
    /// ID of this [`Review`].
    id: Id,

    /// Underlying [`domain::Review`].
    review: OnceCell<domain::Review>,

    /// Business `User` this [`Review`] is about.
    business: OnceCell<api::User>,

    /// Customer `User` who left this [`Review`].
    reviewer: OnceCell<api::User>,
}

impl From<domain::Review> for Review {
    fn from(review: domain::Review) -> Self {
        Self {
            id: review.id.into(),
            review: OnceCell::new_with(Some(review)),
            business: OnceCell::new(),
            reviewer: OnceCell::new(),
        }
    }
}

impl Review {
    /// Creates a new [`Review`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Review`] with the provided ID exists,
    /// otherwise accessing this [`Review`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            review: OnceCell::new(),
            business: OnceCell::new(),
            reviewer: OnceCell::new(),
        }
    }

    /// Returns the underlying [`domain::Review`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Review`] doesn't exist.
    async fn review(&self, ctx: &Context) -> Result<&domain::Review, Error> {
        let id = self.id.into();
        self.review
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::review::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|r| {
                        future::ready(r.ok_or_else(|| {
                            api::query::ReviewError::NotExists.into()
                        }))
                    })
            })
            .await
    }
}

/// Feedback left by a customer `User` about a business `User`.
#[graphql_object(context = Context)]
impl Review {
    /// Unique identifier of this `Review`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Review.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Business `User` this `Review` is about.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Review.business",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn business(&self, ctx: &Context) -> Result<&api::User, Error> {
        let id = self.review(ctx).await?.business_id;
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

    /// Customer `User` who left this `Review`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Review.reviewer",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn reviewer(&self, ctx: &Context) -> Result<&api::User, Error> {
        let id = self.review(ctx).await?.reviewer_id;
        self.reviewer
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

    /// Rating given by this `Review`, from 1 to 5.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Review.rating",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn rating(&self, ctx: &Context) -> Result<i32, Error> {
        Ok(i16::from(self.review(ctx).await?.rating).into())
    }

    /// Comment of this `Review`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Review.comment",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn comment(&self, ctx: &Context) -> Result<Comment, Error> {
        Ok(self.review(ctx).await?.comment.clone().into())
    }

    /// `DateTime` when this `Review` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Review.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.review(ctx).await?.created_at.coerce())
    }

    /// `DateTime` when this `Review` was updated the last time.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Review.updatedAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn updated_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.review(ctx).await?.updated_at.coerce())
    }
}

/// Unique identifier of a `Review`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::review::Id)]
#[into(domain::review::Id)]
#[graphql(name = "ReviewId", transparent)]
pub struct Id(Uuid);

/// Comment of a `Review`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ReviewComment",
    with = scalar::Via::<domain::review::Comment>,
)]
pub struct Comment(domain::review::Comment);

/// Field to order a list of `Review`s by.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "ReviewSortBy")]
pub enum SortBy {
    /// Time of the last update.
    UpdatedAt,

    /// Given rating.
    Rating,
}

impl From<SortBy> for read::review::list::OrderBy {
    fn from(sort: SortBy) -> Self {
        match sort {
            SortBy::UpdatedAt => Self::UpdatedAt,
            SortBy::Rating => Self::Rating,
        }
    }
}

pub mod list {
    //! Definitions related to the [`Review`] list.

    use derive_more::{AsRef, From, Into};
    use juniper::{graphql_object, GraphQLScalar};
    use service::{query, read, Query as _};

    use crate::{api::scalar, AsError, Context, Error};

    use super::{Id, Review};

    /// Cursor for the `Review` list.
    #[derive(AsRef, Clone, Copy, Debug, From, GraphQLScalar, Into)]
    #[from(Id, read::review::list::Cursor)]
    #[graphql(
        name = "ReviewListCursor",
        with = scalar::Via::<read::review::list::Cursor>,
    )]
    pub struct Cursor(pub read::review::list::Cursor);

    /// Edge in the [`Review`] list.
    #[derive(Clone, Copy, Debug, From, Into)]
    pub struct Edge(read::review::list::Edge);

    /// Edge in the `Review` list.
    #[graphql_object(name = "ReviewListEdge", context = Context)]
    impl Edge {
        /// Cursor of this `ReviewListEdge`.
        #[must_use]
        pub fn cursor(&self) -> Cursor {
            self.0.cursor.into()
        }

        /// Node of this `ReviewListEdge`.
        #[must_use]
        pub fn node(&self) -> Review {
            #[expect(
                unsafe_code,
                reason = "`Edge` loaded from repository guarantees `Review` \
                          existence"
            )]
            unsafe {
                Review::new_unchecked(self.0.node)
            }
        }
    }

    /// Connection of the [`Review`] list.
    #[derive(Clone, Debug, From, Into)]
    pub struct Connection(read::review::list::Connection);

    /// Connection of the `Review` list.
    #[graphql_object(name = "ReviewListConnection", context = Context)]
    impl Connection {
        /// Edges in this `ReviewListConnection`.
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
        /// Underlying [`read::review::list::PageInfo`].
        info: read::review::list::PageInfo,

        /// Start cursor of the page.
        start_cursor: Option<Cursor>,

        /// End cursor of the page.
        end_cursor: Option<Cursor>,
    }

    /// Information about a `ReviewListConnection` page.
    #[graphql_object(name = "ReviewListPageInfo", context = Context)]
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

        /// Total `Review`s count.
        pub async fn total_count(&self, ctx: &Context) -> Result<i32, Error> {
            ctx.service()
                .execute(query::reviews::TotalCount::by(()))
                .await
                .map_err(AsError::into_error)
                .map_err(ctx.error())
                .map(Into::into)
        }
    }
}

define_error! {
    enum RatingError {
        #[code = "INVALID_RATING"]
        #[status = BAD_REQUEST]
        #[message = "`Rating` must fit the 1..=5 range"]
        Invalid,
    }
}
