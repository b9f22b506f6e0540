//! [`Detail`] definitions.

use common::{define_kind, Price};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::{Offer, Order};
use crate::domain::offer;

/// Priced tier of an [`Offer`].
#[derive(Clone, Debug)]
pub struct Detail {
    /// ID of this [`Detail`].
    pub id: Id,

    /// ID of the [`Offer`] this [`Detail`] belongs to.
    pub offer_id: offer::Id,

    /// [`Title`] of this [`Detail`].
    pub title: Title,

    /// Number of [`Revisions`] included into this [`Detail`].
    pub revisions: Revisions,

    /// [`DeliveryTime`] promised by this [`Detail`].
    pub delivery_time: DeliveryTime,

    /// [`Price`] of this [`Detail`].
    ///
    /// [`Order`]s snapshot it at their creation, so changing it doesn't
    /// affect the already created ones.
    pub price: Price,

    /// Ordered list of [`Feature`]s included into this [`Detail`].
    pub features: Vec<Feature>,

    /// [`Kind`] of this [`Detail`].
    pub kind: Kind,
}

define_kind! {
    #[doc = "Kind of a [`Detail`]. Multiple [`Detail`]s of the same [`Kind`] \
             may coexist in a single [`Offer`]."]
    enum Kind {
        #[doc = "The cheapest starter tier."]
        Basic = 1,

        #[doc = "The middle tier."]
        Standard = 2,

        #[doc = "The top tier."]
        Premium = 3,
    }
}

/// ID of a [`Detail`].
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

/// Title of a [`Detail`].
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

/// Number of revisions included into a [`Detail`].
#[derive(
    Clone, Copy, Debug, Display, Eq, Into, Ord, PartialEq, PartialOrd,
)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Revisions(i32);

impl Revisions {
    /// Creates a new [`Revisions`] number.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `num` is non-negative.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub const unsafe fn new_unchecked(num: i32) -> Self {
        Self(num)
    }

    /// Creates a new [`Revisions`] number if the given `num` is valid.
    #[must_use]
    pub fn new(num: i32) -> Option<Self> {
        (num >= 0).then_some(Self(num))
    }
}

/// Delivery time promised by a [`Detail`], in days.
#[derive(
    Clone, Copy, Debug, Display, Eq, Into, Ord, PartialEq, PartialOrd,
)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct DeliveryTime(i32);

impl DeliveryTime {
    /// Creates a new [`DeliveryTime`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `days` is non-negative.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub const unsafe fn new_unchecked(days: i32) -> Self {
        Self(days)
    }

    /// Creates a new [`DeliveryTime`] if the given `days` is valid.
    #[must_use]
    pub fn new(days: i32) -> Option<Self> {
        (days >= 0).then_some(Self(days))
    }
}

/// Single feature included into a [`Detail`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Feature(String);

impl Feature {
    /// Creates a new [`Feature`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `feature` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(feature: impl Into<String>) -> Self {
        Self(feature.into())
    }

    /// Creates a new [`Feature`] if the given `feature` is valid.
    #[must_use]
    pub fn new(feature: impl Into<String>) -> Option<Self> {
        let feature = feature.into();
        Self::check(&feature).then_some(Self(feature))
    }

    /// Checks whether the given `feature` is a valid [`Feature`].
    fn check(feature: impl AsRef<str>) -> bool {
        let feature = feature.as_ref();
        feature.trim() == feature && !feature.is_empty() && feature.len() <= 512
    }
}

impl FromStr for Feature {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Feature`")
    }
}

#[cfg(test)]
mod spec {
    use super::{DeliveryTime, Revisions};

    #[test]
    fn revisions_number_is_non_negative() {
        assert!(Revisions::new(0).is_some());
        assert!(Revisions::new(10).is_some());

        assert!(Revisions::new(-1).is_none());
    }

    #[test]
    fn delivery_time_is_non_negative() {
        assert!(DeliveryTime::new(0).is_some());
        assert!(DeliveryTime::new(14).is_some());

        assert!(DeliveryTime::new(-3).is_none());
    }
}
