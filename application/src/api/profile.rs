//! [`Profile`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use futures::{future, TryFutureExt as _};
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::{domain, query, Query};
use tokio::sync::OnceCell;

use crate::{
    api::{self, scalar},
    AsError, Context, Error,
};

/// Public face of a `User`.
#[derive(Clone, Debug, From)]
pub struct Profile {
    /// ID of the `User` this [`Profile`] belongs to.
    pub user_id: api::user::Id,

    /// [`domain::Profile`] representing this [`Profile`].
    profile: OnceCell<domain::Profile>,
}

impl From<domain::Profile> for Profile {
    fn from(profile: domain::Profile) -> Self {
        Self {
            user_id: profile.user_id.into(),
            profile: OnceCell::new_with(Some(profile)),
        }
    }
}

impl Profile {
    /// Creates a new [`Profile`] with the provided `User` ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Profile`] of the `User` with the provided ID
    /// exists, otherwise accessing this [`Profile`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(user_id: impl Into<api::user::Id>) -> Self {
        Self {
            user_id: user_id.into(),
            profile: OnceCell::new(),
        }
    }

    /// Returns the [`domain::Profile`] representing this [`Profile`].
    ///
    /// # Errors
    ///
    /// Error if the [`domain::Profile`] doesn't exist.
    async fn profile(&self, ctx: &Context) -> Result<&domain::Profile, Error> {
        let user_id = self.user_id.into();
        self.profile
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::profile::ById::by(user_id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|p| {
                        future::ready(p.ok_or_else(|| {
                            api::query::ProfileError::NotExists.into()
                        }))
                    })
            })
            .await
    }
}

/// Public face of a `User`.
#[graphql_object(context = Context)]
impl Profile {
    /// Unique identifier of the `User` this `Profile` belongs to.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Profile.userId",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn user_id(&self) -> api::user::Id {
        self.user_id
    }

    /// `User` this `Profile` belongs to.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Profile.user",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn user(&self) -> api::User {
        #[expect(
            unsafe_code,
            reason = "`Profile` always belongs to an existing `User`"
        )]
        unsafe {
            api::User::new_unchecked(self.user_id)
        }
    }

    /// Kind of this `Profile`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Profile.kind",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn kind(&self, ctx: &Context) -> Result<Kind, Error> {
        Ok(self.profile(ctx).await?.kind.into())
    }

    /// First name of the `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Profile.firstName",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn first_name(
        &self,
        ctx: &Context,
    ) -> Result<Option<FirstName>, Error> {
        Ok(self.profile(ctx).await?.first_name.clone().map(Into::into))
    }

    /// Last name of the `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Profile.lastName",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn last_name(
        &self,
        ctx: &Context,
    ) -> Result<Option<LastName>, Error> {
        Ok(self.profile(ctx).await?.last_name.clone().map(Into::into))
    }

    /// URL of the avatar image.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Profile.avatarUrl",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn avatar_url(
        &self,
        ctx: &Context,
    ) -> Result<Option<FileUrl>, Error> {
        Ok(self.profile(ctx).await?.avatar_url.clone().map(Into::into))
    }

    /// Free-form location of the `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Profile.location",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn location(
        &self,
        ctx: &Context,
    ) -> Result<Option<Location>, Error> {
        Ok(self.profile(ctx).await?.location.clone().map(Into::into))
    }

    /// Contact telephone number of the `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Profile.tel",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn tel(&self, ctx: &Context) -> Result<Option<Tel>, Error> {
        Ok(self.profile(ctx).await?.tel.clone().map(Into::into))
    }

    /// Free-form self-description of the `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Profile.description",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn description(
        &self,
        ctx: &Context,
    ) -> Result<Option<Description>, Error> {
        Ok(self.profile(ctx).await?.description.clone().map(Into::into))
    }

    /// Working hours announced by the `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Profile.workingHours",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn working_hours(
        &self,
        ctx: &Context,
    ) -> Result<Option<WorkingHours>, Error> {
        Ok(self
            .profile(ctx)
            .await?
            .working_hours
            .clone()
            .map(Into::into))
    }

    /// `DateTime` when this `Profile` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Profile.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.profile(ctx).await?.created_at.coerce())
    }
}

/// Kind of a `Profile`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "ProfileKind")]
pub enum Kind {
    /// Buyer of offers.
    Customer,

    /// Seller publishing offers.
    Business,
}

impl From<domain::profile::Kind> for Kind {
    fn from(kind: domain::profile::Kind) -> Self {
        use domain::profile::Kind as K;
        match kind {
            K::Customer => Self::Customer,
            K::Business => Self::Business,
        }
    }
}

impl From<Kind> for domain::profile::Kind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Customer => Self::Customer,
            Kind::Business => Self::Business,
        }
    }
}

/// First name in a `Profile`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ProfileFirstName",
    with = scalar::Via::<domain::profile::FirstName>,
)]
pub struct FirstName(domain::profile::FirstName);

/// Last name in a `Profile`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ProfileLastName",
    with = scalar::Via::<domain::profile::LastName>,
)]
pub struct LastName(domain::profile::LastName);

/// URL of a file attached to a `Profile`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ProfileFileUrl",
    with = scalar::Via::<domain::profile::FileUrl>,
)]
pub struct FileUrl(domain::profile::FileUrl);

/// Location in a `Profile`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ProfileLocation",
    with = scalar::Via::<domain::profile::Location>,
)]
pub struct Location(domain::profile::Location);

/// Telephone number in a `Profile`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ProfileTel",
    with = scalar::Via::<domain::profile::Tel>,
)]
pub struct Tel(domain::profile::Tel);

/// Self-description in a `Profile`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ProfileDescription",
    with = scalar::Via::<domain::profile::Description>,
)]
pub struct Description(domain::profile::Description);

/// Working hours in a `Profile`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ProfileWorkingHours",
    with = scalar::Via::<domain::profile::WorkingHours>,
)]
pub struct WorkingHours(domain::profile::WorkingHours);

pub mod list {
    //! Definitions related to [`Profile`] list.

    use derive_more::{AsRef, From, Into};
    use juniper::{graphql_object, GraphQLScalar};
    use service::{query, read, Query as _};

    use crate::{
        api::{scalar, user},
        AsError, Context, Error,
    };

    use super::Profile;

    /// Cursor for the `Profile` list.
    #[derive(AsRef, Clone, Copy, Debug, From, GraphQLScalar, Into)]
    #[from(user::Id, read::profile::list::Cursor)]
    #[graphql(
        name = "ProfileListCursor",
        with = scalar::Via::<read::profile::list::Cursor>,
    )]
    pub struct Cursor(pub read::profile::list::Cursor);

    /// Edge in the [`Profile`] list.
    #[derive(Clone, Copy, Debug, From, Into)]
    pub struct Edge(read::profile::list::Edge);

    /// Edge in the `Profile` list.
    #[graphql_object(name = "ProfileListEdge", context = Context)]
    impl Edge {
        /// Cursor of this `ProfileListEdge`.
        #[must_use]
        pub fn cursor(&self) -> Cursor {
            self.0.cursor.into()
        }

        /// Node of this `ProfileListEdge`.
        #[must_use]
        pub fn node(&self) -> Profile {
            #[expect(
                unsafe_code,
                reason = "`Edge` loaded from repository guarantees `Profile` \
                          existence"
            )]
            unsafe {
                Profile::new_unchecked(self.0.node)
            }
        }
    }

    /// Connection of the [`Profile`] list.
    #[derive(Clone, Debug, From, Into)]
    pub struct Connection(read::profile::list::Connection);

    /// Connection of the `Profile` list.
    #[graphql_object(name = "ProfileListConnection", context = Context)]
    impl Connection {
        /// Edges in this `ProfileListConnection`.
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
        /// Underlying [`read::profile::list::PageInfo`].
        info: read::profile::list::PageInfo,

        /// Start cursor of the page.
        start_cursor: Option<Cursor>,

        /// End cursor of the page.
        end_cursor: Option<Cursor>,
    }

    /// Information about a `ProfileListConnection` page.
    #[graphql_object(name = "ProfileListPageInfo", context = Context)]
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

        /// Total `Profile`s count.
        pub async fn total_count(&self, ctx: &Context) -> Result<i32, Error> {
            ctx.service()
                .execute(query::profiles::TotalCount::by(()))
                .await
                .map_err(AsError::into_error)
                .map_err(ctx.error())
                .map(Into::into)
        }
    }
}
