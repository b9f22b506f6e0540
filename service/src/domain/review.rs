//! [`Review`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::User;
use crate::domain::user;

/// Rating with a comment, left by a customer [`User`] about a business one.
///
/// At most one [`Review`] may exist per (reviewer, business) pair.
#[derive(Clone, Debug)]
pub struct Review {
    /// ID of this [`Review`].
    pub id: Id,

    /// ID of the reviewed business [`User`].
    pub business_id: user::Id,

    /// ID of the [`User`] who left this [`Review`].
    pub reviewer_id: user::Id,

    /// [`Rating`] given by the reviewer.
    pub rating: Rating,

    /// [`Comment`] accompanying the [`Rating`].
    pub comment: Comment,

    /// [`DateTime`] when this [`Review`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Review`] was updated last time.
    pub updated_at: UpdateDateTime,
}

/// ID of a [`Review`].
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

/// Rating of a [`Review`], from 1 to 5 inclusively.
#[derive(
    Clone, Copy, Debug, Display, Eq, Into, Ord, PartialEq, PartialOrd,
)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Rating(i16);

impl Rating {
    /// Creates a new [`Rating`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `value` fits the 1..=5 range.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub const unsafe fn new_unchecked(value: i16) -> Self {
        Self(value)
    }

    /// Creates a new [`Rating`] if the given `value` is valid.
    #[must_use]
    pub fn new(value: i16) -> Option<Self> {
        (1..=5).contains(&value).then_some(Self(value))
    }
}

/// Comment of a [`Review`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Comment(String);

impl Comment {
    /// Creates a new [`Comment`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `comment` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(comment: impl Into<String>) -> Self {
        Self(comment.into())
    }

    /// Creates a new [`Comment`] if the given `comment` is valid.
    #[must_use]
    pub fn new(comment: impl Into<String>) -> Option<Self> {
        let comment = comment.into();
        Self::check(&comment).then_some(Self(comment))
    }

    /// Checks whether the given `comment` is a valid [`Comment`].
    fn check(comment: impl AsRef<str>) -> bool {
        let comment = comment.as_ref();
        !comment.is_empty() && comment.len() <= 8192
    }
}

impl FromStr for Comment {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Comment`")
    }
}

/// [`DateTime`] when a [`Review`] was created.
pub type CreationDateTime = DateTimeOf<(Review, unit::Creation)>;

/// [`DateTime`] when a [`Review`] was updated last time.
pub type UpdateDateTime = DateTimeOf<(Review, unit::Update)>;

#[cfg(test)]
mod spec {
    use super::Rating;

    #[test]
    fn rating_fits_one_to_five() {
        assert!(Rating::new(1).is_some());
        assert!(Rating::new(3).is_some());
        assert!(Rating::new(5).is_some());

        assert!(Rating::new(0).is_none());
        assert!(Rating::new(6).is_none());
        assert!(Rating::new(-2).is_none());
    }
}
