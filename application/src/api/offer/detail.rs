//! [`Detail`]-related definitions.

use common::Price;
use derive_more::{AsRef, Display, From, Into};
use juniper::{
    graphql_object, GraphQLEnum, GraphQLInputObject, GraphQLScalar,
};
use service::{command, domain};
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    define_error, Context, Error,
};

/// A priced tier of an `Offer`.
#[derive(Clone, Debug, From, Into)]
pub struct Detail(domain::offer::detail::Detail);

/// A priced tier of an `Offer`.
#[graphql_object(name = "OfferDetail", context = Context)]
impl Detail {
    /// Unique identifier of this `OfferDetail`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "OfferDetail.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// `Offer` this `OfferDetail` belongs to.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "OfferDetail.offer",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn offer(&self) -> api::Offer {
        #[expect(
            unsafe_code,
            reason = "`Detail` loaded from repository guarantees `Offer` \
                      existence"
        )]
        unsafe {
            api::Offer::new_unchecked(self.0.offer_id)
        }
    }

    /// Title of this `OfferDetail`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "OfferDetail.title",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn title(&self) -> Title {
        self.0.title.clone().into()
    }

    /// Number of revisions included into this `OfferDetail`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "OfferDetail.revisions",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn revisions(&self) -> i32 {
        self.0.revisions.into()
    }

    /// Delivery time (in days) promised by this `OfferDetail`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "OfferDetail.deliveryTime",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn delivery_time(&self) -> i32 {
        self.0.delivery_time.into()
    }

    /// `Price` of this `OfferDetail`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "OfferDetail.price",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn price(&self) -> Price {
        self.0.price
    }

    /// Features included into this `OfferDetail`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "OfferDetail.features",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn features(&self) -> Vec<Feature> {
        self.0.features.iter().cloned().map(Into::into).collect()
    }

    /// Kind of this `OfferDetail`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "OfferDetail.kind",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn kind(&self) -> Kind {
        self.0.kind.into()
    }
}

/// Unique identifier of an `OfferDetail`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::offer::detail::Id)]
#[into(domain::offer::detail::Id)]
#[graphql(name = "OfferDetailId", transparent)]
pub struct Id(Uuid);

/// Title of an `OfferDetail`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "OfferDetailTitle",
    with = scalar::Via::<domain::offer::detail::Title>,
)]
pub struct Title(domain::offer::detail::Title);

/// Feature included into an `OfferDetail`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "OfferDetailFeature",
    with = scalar::Via::<domain::offer::detail::Feature>,
)]
pub struct Feature(domain::offer::detail::Feature);

/// Kind of an `OfferDetail`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "OfferDetailKind")]
pub enum Kind {
    /// Entry tier.
    Basic,

    /// Middle tier.
    Standard,

    /// Top tier.
    Premium,
}

impl From<domain::offer::detail::Kind> for Kind {
    fn from(kind: domain::offer::detail::Kind) -> Self {
        use domain::offer::detail::Kind as K;
        match kind {
            K::Basic => Self::Basic,
            K::Standard => Self::Standard,
            K::Premium => Self::Premium,
        }
    }
}

impl From<Kind> for domain::offer::detail::Kind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Basic => Self::Basic,
            Kind::Standard => Self::Standard,
            Kind::Premium => Self::Premium,
        }
    }
}

/// Draft of a new `OfferDetail`.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "OfferDetailDraft")]
pub struct Draft {
    /// Title of the `OfferDetail`.
    pub title: Title,

    /// Number of revisions included into the `OfferDetail`.
    pub revisions: i32,

    /// Delivery time (in days) promised by the `OfferDetail`.
    pub delivery_time: i32,

    /// `Price` of the `OfferDetail`.
    pub price: Price,

    /// Features included into the `OfferDetail`.
    pub features: Vec<Feature>,

    /// Kind of the `OfferDetail`.
    pub kind: Kind,
}

impl TryFrom<Draft> for command::create_offer::DetailDraft {
    type Error = Error;

    fn try_from(draft: Draft) -> Result<Self, Self::Error> {
        let Draft {
            title,
            revisions,
            delivery_time,
            price,
            features,
            kind,
        } = draft;
        Ok(Self {
            title: title.into(),
            revisions: domain::offer::detail::Revisions::new(revisions)
                .ok_or(DetailError::InvalidRevisions)?,
            delivery_time: domain::offer::detail::DeliveryTime::new(
                delivery_time,
            )
            .ok_or(DetailError::InvalidDeliveryTime)?,
            price,
            features: features.into_iter().map(Into::into).collect(),
            kind: kind.into(),
        })
    }
}

/// Change of a single `OfferDetail` in an `Offer` update.
///
/// Providing an `id` patches the existing `OfferDetail`, leaving its omitted
/// fields unchanged. Omitting the `id` describes a brand new `OfferDetail`,
/// so all the other fields are required.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "OfferDetailChange")]
pub struct Change {
    /// ID of the `OfferDetail` to patch.
    pub id: Option<Id>,

    /// New title of the `OfferDetail`.
    pub title: Option<Title>,

    /// New number of revisions included into the `OfferDetail`.
    pub revisions: Option<i32>,

    /// New delivery time (in days) promised by the `OfferDetail`.
    pub delivery_time: Option<i32>,

    /// New `Price` of the `OfferDetail`.
    pub price: Option<Price>,

    /// New features included into the `OfferDetail`.
    pub features: Option<Vec<Feature>>,

    /// New kind of the `OfferDetail`.
    pub kind: Option<Kind>,
}

impl TryFrom<Change> for command::update_offer::DetailChange {
    type Error = Error;

    fn try_from(change: Change) -> Result<Self, Self::Error> {
        let Change {
            id,
            title,
            revisions,
            delivery_time,
            price,
            features,
            kind,
        } = change;

        let revisions = revisions
            .map(|num| {
                domain::offer::detail::Revisions::new(num)
                    .ok_or(DetailError::InvalidRevisions)
            })
            .transpose()?;
        let delivery_time = delivery_time
            .map(|days| {
                domain::offer::detail::DeliveryTime::new(days)
                    .ok_or(DetailError::InvalidDeliveryTime)
            })
            .transpose()?;

        Ok(if let Some(id) = id {
            Self::Update(command::update_offer::DetailPatch {
                id: id.into(),
                title: title.map(Into::into),
                revisions,
                delivery_time,
                price,
                features: features
                    .map(|f| f.into_iter().map(Into::into).collect()),
                kind: kind.map(Into::into),
            })
        } else {
            Self::Add(command::create_offer::DetailDraft {
                title: title.ok_or(DetailError::IncompleteDraft)?.into(),
                revisions: revisions.ok_or(DetailError::IncompleteDraft)?,
                delivery_time: delivery_time
                    .ok_or(DetailError::IncompleteDraft)?,
                price: price.ok_or(DetailError::IncompleteDraft)?,
                features: features
                    .ok_or(DetailError::IncompleteDraft)?
                    .into_iter()
                    .map(Into::into)
                    .collect(),
                kind: kind.ok_or(DetailError::IncompleteDraft)?.into(),
            })
        })
    }
}

define_error! {
    enum DetailError {
        #[code = "INCOMPLETE_DETAIL_DRAFT"]
        #[status = BAD_REQUEST]
        #[message = "`OfferDetailChange` without an ID must provide all the \
                     fields of a new `OfferDetail`"]
        IncompleteDraft,

        #[code = "INVALID_DELIVERY_TIME"]
        #[status = BAD_REQUEST]
        #[message = "`OfferDetail` delivery time must be a non-negative \
                     number of days"]
        InvalidDeliveryTime,

        #[code = "INVALID_REVISIONS"]
        #[status = BAD_REQUEST]
        #[message = "`OfferDetail` revisions number must not be negative"]
        InvalidRevisions,
    }
}
