//! [`Offer`]-related definitions.

pub mod detail;

use std::future;

use common::{DateTime, Price};
use derive_more::{AsRef, Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::{command, domain, query, read, Query};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    AsError, Context, Error,
};

/// A service listing published by a business `User`.
#[derive(Clone, Debug)]
pub struct Offer {
    /// ID of this [`Offer`].
    id: Id,

    /// Underlying [`domain::Offer`].
    offer: OnceCell<domain::Offer>,

    /// [`detail::Detail`]s of this [`Offer`].
    ///
    /// [`detail::Detail`]: domain::offer::detail::Detail
    details: OnceCell<Vec<domain::offer::detail::Detail>>,

    /// `User` owning this [`Offer`].
    owner: OnceCell<api::User>,
}

impl From<domain::Offer> for Offer {
    fn from(offer: domain::Offer) -> Self {
        Self {
            id: offer.id.into(),
            offer: OnceCell::new_with(Some(offer)),
            details: OnceCell::new(),
            owner: OnceCell::new(),
        }
    }
}

impl From<command::create_offer::Output> for Offer {
    fn from(output: command::create_offer::Output) -> Self {
        let command::create_offer::Output { offer, details } = output;
        Self {
            id: offer.id.into(),
            offer: OnceCell::new_with(Some(offer)),
            details: OnceCell::new_with(Some(details)),
            owner: OnceCell::new(),
        }
    }
}

impl From<command::update_offer::Output> for Offer {
    fn from(output: command::update_offer::Output) -> Self {
        let command::update_offer::Output { offer, details } = output;
        Self {
            id: offer.id.into(),
            offer: OnceCell::new_with(Some(offer)),
            details: OnceCell::new_with(Some(details)),
            owner: OnceCell::new(),
        }
    }
}

impl Offer {
    /// Creates a new [`Offer`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Offer`] with the provided ID exists,
    /// otherwise accessing this [`Offer`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            offer: OnceCell::new(),
            details: OnceCell::new(),
            owner: OnceCell::new(),
        }
    }

    /// Returns the underlying [`domain::Offer`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Offer`] doesn't exist.
    async fn offer(&self, ctx: &Context) -> Result<&domain::Offer, Error> {
        let id = self.id.into();
        self.offer
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::offer::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|o| {
                        future::ready(o.ok_or_else(|| {
                            api::query::OfferError::NotExists.into()
                        }))
                    })
            })
            .await
    }

    /// Returns the [`domain::offer::detail::Detail`]s of this [`Offer`].
    async fn fetch_details(
        &self,
        ctx: &Context,
    ) -> Result<&Vec<domain::offer::detail::Detail>, Error> {
        let id = self.id.into();
        self.details
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::offer::Details::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
            })
            .await
    }
}

/// A service listing published by a business `User`.
#[graphql_object(context = Context)]
impl Offer {
    /// Unique identifier of this `Offer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Offer.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// `User` owning this `Offer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Offer.owner",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn owner(&self, ctx: &Context) -> Result<&api::User, Error> {
        let id = self.offer(ctx).await?.owner_id;
        self.owner
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

    /// Title of this `Offer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Offer.title",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn title(&self, ctx: &Context) -> Result<Title, Error> {
        Ok(self.offer(ctx).await?.title.clone().into())
    }

    /// URL of the illustration image of this `Offer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Offer.imageUrl",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn image_url(
        &self,
        ctx: &Context,
    ) -> Result<Option<ImageUrl>, Error> {
        Ok(self.offer(ctx).await?.image_url.clone().map(Into::into))
    }

    /// Description of this `Offer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Offer.description",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn description(
        &self,
        ctx: &Context,
    ) -> Result<Description, Error> {
        Ok(self.offer(ctx).await?.description.clone().into())
    }

    /// Lowest `Price` among `OfferDetail`s of this `Offer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Offer.minPrice",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn min_price(
        &self,
        ctx: &Context,
    ) -> Result<Option<Price>, Error> {
        let details = self.fetch_details(ctx).await?;
        Ok(domain::offer::Summary::new(details).min_price)
    }

    /// Shortest delivery time (in days) among `OfferDetail`s of this `Offer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Offer.minDeliveryTime",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn min_delivery_time(
        &self,
        ctx: &Context,
    ) -> Result<Option<i32>, Error> {
        let details = self.fetch_details(ctx).await?;
        Ok(domain::offer::Summary::new(details)
            .min_delivery_time
            .map(Into::into))
    }

    /// `OfferDetail`s of this `Offer`, from basic to premium.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Offer.details",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn details(
        &self,
        ctx: &Context,
    ) -> Result<Vec<detail::Detail>, Error> {
        Ok(self
            .fetch_details(ctx)
            .await?
            .iter()
            .cloned()
            .map(Into::into)
            .collect())
    }

    /// `DateTime` when this `Offer` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Offer.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.offer(ctx).await?.created_at.coerce())
    }

    /// `DateTime` when this `Offer` was updated the last time.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Offer.updatedAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn updated_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.offer(ctx).await?.updated_at.coerce())
    }
}

/// Unique identifier of an `Offer`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::offer::Id)]
#[into(domain::offer::Id)]
#[graphql(name = "OfferId", transparent)]
pub struct Id(Uuid);

/// Title of an `Offer`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "OfferTitle",
    with = scalar::Via::<domain::offer::Title>,
)]
pub struct Title(domain::offer::Title);

/// URL of an `Offer` illustration image.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "OfferImageUrl",
    with = scalar::Via::<domain::offer::ImageUrl>,
)]
pub struct ImageUrl(domain::offer::ImageUrl);

/// Description of an `Offer`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "OfferDescription",
    with = scalar::Via::<domain::offer::Description>,
)]
pub struct Description(domain::offer::Description);

/// Field to order a list of `Offer`s by.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "OfferSortBy")]
pub enum SortBy {
    /// Time of the last update.
    UpdatedAt,

    /// Lowest `Price` among `OfferDetail`s.
    MinPrice,
}

impl From<SortBy> for read::offer::list::OrderBy {
    fn from(sort: SortBy) -> Self {
        match sort {
            SortBy::UpdatedAt => Self::UpdatedAt,
            SortBy::MinPrice => Self::MinPrice,
        }
    }
}

pub mod list {
    //! Definitions related to the [`Offer`] list.

    use derive_more::{AsRef, From, Into};
    use juniper::{graphql_object, GraphQLScalar};
    use service::{query, read, Query as _};

    use crate::{api::scalar, AsError, Context, Error};

    use super::{Id, Offer};

    /// Cursor for the `Offer` list.
    #[derive(AsRef, Clone, Copy, Debug, From, GraphQLScalar, Into)]
    #[from(Id, read::offer::list::Cursor)]
    #[graphql(
        name = "OfferListCursor",
        with = scalar::Via::<read::offer::list::Cursor>,
    )]
    pub struct Cursor(pub read::offer::list::Cursor);

    /// Edge in the [`Offer`] list.
    #[derive(Clone, Copy, Debug, From, Into)]
    pub struct Edge(read::offer::list::Edge);

    /// Edge in the `Offer` list.
    #[graphql_object(name = "OfferListEdge", context = Context)]
    impl Edge {
        /// Cursor of this `OfferListEdge`.
        #[must_use]
        pub fn cursor(&self) -> Cursor {
            self.0.cursor.into()
        }

        /// Node of this `OfferListEdge`.
        #[must_use]
        pub fn node(&self) -> Offer {
            #[expect(
                unsafe_code,
                reason = "`Edge` loaded from repository guarantees `Offer` \
                          existence"
            )]
            unsafe {
                Offer::new_unchecked(self.0.node)
            }
        }
    }

    /// Connection of the [`Offer`] list.
    #[derive(Clone, Debug, From, Into)]
    pub struct Connection(read::offer::list::Connection);

    /// Connection of the `Offer` list.
    #[graphql_object(name = "OfferListConnection", context = Context)]
    impl Connection {
        /// Edges in this `OfferListConnection`.
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
        /// Underlying [`read::offer::list::PageInfo`].
        info: read::offer::list::PageInfo,

        /// Start cursor of the page.
        start_cursor: Option<Cursor>,

        /// End cursor of the page.
        end_cursor: Option<Cursor>,
    }

    /// Information about an `OfferListConnection` page.
    #[graphql_object(name = "OfferListPageInfo", context = Context)]
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

        /// Total `Offer`s count.
        pub async fn total_count(&self, ctx: &Context) -> Result<i32, Error> {
            ctx.service()
                .execute(query::offers::TotalCount::by(()))
                .await
                .map_err(AsError::into_error)
                .map_err(ctx.error())
                .map(Into::into)
        }
    }
}
