//! [`Offer`] definitions.

pub mod detail;

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf, Price};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::{Profile, User};
use crate::domain::user;

#[doc(inline)]
pub use self::detail::Detail;

/// Service published by a business [`User`], priced in [`Detail`] tiers.
#[derive(Clone, Debug)]
pub struct Offer {
    /// ID of this [`Offer`].
    pub id: Id,

    /// ID of the [`User`] owning this [`Offer`].
    ///
    /// Always refers to a business [`Profile`].
    pub owner_id: user::Id,

    /// [`Title`] of this [`Offer`].
    pub title: Title,

    /// [`ImageUrl`] of the illustration picture, if any.
    pub image_url: Option<ImageUrl>,

    /// [`Description`] of this [`Offer`].
    pub description: Description,

    /// [`DateTime`] when this [`Offer`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Offer`] was updated last time.
    pub updated_at: UpdateDateTime,
}

impl Offer {
    /// Minimum number of [`Detail`]s an [`Offer`] is created with.
    pub const MIN_DETAILS: usize = 3;
}

/// ID of an [`Offer`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Title of an [`Offer`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Title(String);

impl Title {
    /// Creates a new [`Title`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `title` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    /// Creates a new [`Title`] if the given `title` is valid.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        Self::check(&title).then_some(Self(title))
    }

    /// Checks whether the given `title` is a valid [`Title`].
    fn check(title: impl AsRef<str>) -> bool {
        let title = title.as_ref();
        title.trim() == title && !title.is_empty() && title.len() <= 512
    }
}

impl FromStr for Title {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Title`")
    }
}

/// Description of an [`Offer`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Description(String);

impl Description {
    /// Creates a new [`Description`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `description` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(description: impl Into<String>) -> Self {
        Self(description.into())
    }

    /// Creates a new [`Description`] if the given `description` is valid.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Option<Self> {
        let description = description.into();
        Self::check(&description).then_some(Self(description))
    }

    /// Checks whether the given `description` is a valid [`Description`].
    fn check(description: impl AsRef<str>) -> bool {
        let description = description.as_ref();
        !description.is_empty() && description.len() <= 8192
    }
}

impl FromStr for Description {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Description`")
    }
}

/// URL of an [`Offer`]'s illustration picture.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct ImageUrl(String);

impl ImageUrl {
    /// Creates a new [`ImageUrl`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `url` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Creates a new [`ImageUrl`] if the given `url` is valid.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        Self::check(&url).then_some(Self(url))
    }

    /// Checks whether the given `url` is a valid [`ImageUrl`].
    fn check(url: impl AsRef<str>) -> bool {
        let url = url.as_ref();
        url.trim() == url
            && !url.is_empty()
            && url.len() <= 2048
            && !url.chars().any(char::is_whitespace)
    }
}

impl FromStr for ImageUrl {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `ImageUrl`")
    }
}

/// Projection of the cheapest and the fastest [`Detail`]s of an [`Offer`].
///
/// Both minimums are picked independently, so may come from different
/// [`Detail`]s.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Summary {
    /// Lowest [`Price`] among the [`Detail`]s, if any exist.
    pub min_price: Option<Price>,

    /// Shortest [`detail::DeliveryTime`] among the [`Detail`]s, if any exist.
    pub min_delivery_time: Option<detail::DeliveryTime>,
}

impl Summary {
    /// Computes a [`Summary`] over the given [`Detail`]s.
    #[must_use]
    pub fn new(details: &[Detail]) -> Self {
        Self {
            min_price: details.iter().map(|d| d.price).min(),
            min_delivery_time: details.iter().map(|d| d.delivery_time).min(),
        }
    }
}

/// [`DateTime`] when an [`Offer`] was created.
pub type CreationDateTime = DateTimeOf<(Offer, unit::Creation)>;

/// [`DateTime`] when an [`Offer`] was updated last time.
pub type UpdateDateTime = DateTimeOf<(Offer, unit::Update)>;

#[cfg(test)]
mod spec {
    use common::Price;
    use rust_decimal::Decimal;

    use super::{detail, Detail, Summary};

    fn detail(kind: detail::Kind, price: u32, days: i32) -> Detail {
        Detail {
            id: detail::Id::new(),
            offer_id: super::Id::new(),
            title: detail::Title::new("tier").unwrap(),
            revisions: detail::Revisions::new(1).unwrap(),
            delivery_time: detail::DeliveryTime::new(days).unwrap(),
            price: Price::new(Decimal::from(price)).unwrap(),
            features: vec![],
            kind,
        }
    }

    #[test]
    fn summary_picks_minimums_independently() {
        let details = [
            detail(detail::Kind::Basic, 100, 10),
            detail(detail::Kind::Standard, 50, 30),
            detail(detail::Kind::Premium, 200, 5),
        ];

        let summary = Summary::new(&details);

        assert_eq!(summary.min_price, Price::new(Decimal::from(50)));
        assert_eq!(summary.min_delivery_time, detail::DeliveryTime::new(5));
    }

    #[test]
    fn summary_of_no_details_is_empty() {
        let summary = Summary::new(&[]);

        assert_eq!(summary.min_price, None);
        assert_eq!(summary.min_delivery_time, None);
    }
}
