//! Platform-wide statistics definitions.

use derive_more::{From, Into};
use juniper::graphql_object;
use service::query;

use crate::{api, Context};

/// Publicly visible aggregate statistics of the platform.
#[derive(Clone, Copy, Debug, From, Into)]
pub struct Summary(query::stats::Output);

/// Publicly visible aggregate statistics of the platform.
#[graphql_object(name = "PlatformSummary", context = Context)]
impl Summary {
    /// Total count of `Review`s left on the platform.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PlatformSummary.reviewCount",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn review_count(&self) -> i32 {
        self.0.reviews.into()
    }

    /// Average rating across all the `Review`s, rounded to 1 decimal place.
    ///
    /// `0` if no `Review`s exist yet.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PlatformSummary.averageRating",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn average_rating(&self) -> f64 {
        self.0.average_rating.into()
    }

    /// Total count of business `Profile`s registered on the platform.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PlatformSummary.businessProfileCount",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn business_profile_count(&self) -> i32 {
        self.0.businesses.into()
    }

    /// Total count of `Offer`s published on the platform.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PlatformSummary.offerCount",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn offer_count(&self) -> i32 {
        self.0.offers.into()
    }
}
