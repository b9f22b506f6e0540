//! [`Order`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf, Price};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::{offer::Detail, Offer, Profile, User};
use crate::domain::{offer::detail, user};

/// Purchase of a single [`Detail`] by a customer [`User`].
#[derive(Clone, Debug)]
pub struct Order {
    /// ID of this [`Order`].
    pub id: Id,

    /// ID of the customer [`User`] who placed this [`Order`].
    pub customer_id: user::Id,

    /// ID of the business [`User`] fulfilling this [`Order`].
    ///
    /// Denormalized from the [`Offer`] owner at the creation moment and
    /// never re-derived afterwards.
    pub business_id: user::Id,

    /// ID of the purchased [`Detail`].
    pub detail_id: detail::Id,

    /// [`Price`] of the purchased [`Detail`] at the creation moment.
    ///
    /// Later [`Detail`] edits don't affect it.
    pub price: Price,

    /// Current [`Status`] of this [`Order`].
    pub status: Status,

    /// [`DateTime`] when this [`Order`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Order`] was updated last time.
    pub updated_at: UpdateDateTime,
}

define_kind! {
    #[doc = "Status of an [`Order`]."]
    enum Status {
        #[doc = "Work is ongoing. The only status an [`Order`] is created \
                 in."]
        InProgress = 1,

        #[doc = "Work is accepted as done. Terminal."]
        Completed = 2,

        #[doc = "[`Order`] is called off. Terminal."]
        Cancelled = 3,
    }
}

impl Status {
    /// Indicates whether an [`Order`] in this [`Status`] may move into the
    /// given `next` one.
    ///
    /// Only [`InProgress`] [`Order`]s may move, and only into a terminal
    /// [`Status`].
    ///
    /// [`InProgress`]: Status::InProgress
    #[must_use]
    pub fn may_become(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::InProgress, Self::Completed | Self::Cancelled),
        )
    }

    /// Indicates whether this [`Status`] is terminal, so an [`Order`] in it
    /// cannot move anymore.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// ID of an [`Order`].
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

/// [`DateTime`] when an [`Order`] was created.
pub type CreationDateTime = DateTimeOf<(Order, unit::Creation)>;

/// [`DateTime`] when an [`Order`] was updated last time.
pub type UpdateDateTime = DateTimeOf<(Order, unit::Update)>;

#[cfg(test)]
mod spec {
    use super::Status;

    #[test]
    fn status_moves_out_of_in_progress_only() {
        assert!(Status::InProgress.may_become(Status::Completed));
        assert!(Status::InProgress.may_become(Status::Cancelled));

        assert!(!Status::InProgress.may_become(Status::InProgress));
        assert!(!Status::Completed.may_become(Status::Cancelled));
        assert!(!Status::Completed.may_become(Status::InProgress));
        assert!(!Status::Cancelled.may_become(Status::Completed));
        assert!(!Status::Cancelled.may_become(Status::InProgress));
    }

    #[test]
    fn only_in_progress_status_is_not_terminal() {
        assert!(!Status::InProgress.is_terminal());
        assert!(Status::Completed.is_terminal());
        assert!(Status::Cancelled.is_terminal());
    }
}
