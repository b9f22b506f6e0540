//! [`Review`] read model definition.
//!
//! [`Review`]: crate::domain::Review

use derive_more::{Display, Into};

#[cfg(doc)]
use crate::domain::{review, Review};

/// Average [`review::Rating`] over a set of [`Review`]s, rounded to 1
/// decimal place.
#[derive(Clone, Copy, Debug, Default, Display, Into, PartialEq)]
pub struct AverageRating(f64);

impl AverageRating {
    /// Creates a new [`AverageRating`], rounding the given `value` to 1
    /// decimal place.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self((value * 10.0).round() / 10.0)
    }
}

pub mod list {
    //! [`Review`]s list definitions.

    use common::define_pagination;
    use derive_more::{From, Into};

    use crate::domain::{review, user};
    #[cfg(doc)]
    use crate::domain::{Review, User};

    define_pagination!(Cursor, Node, Filter, sorted by OrderBy);

    /// Node in a [`Connection`].
    pub type Node = review::Id;

    /// Cursor pointing to a specific [`Review`] in a list.
    pub type Cursor = review::Id;

    /// Filter for [`Selector`].
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter {
        /// ID of the business [`User`] the [`Review`]s are left about.
        pub business: Option<user::Id>,

        /// ID of the [`User`] who left the [`Review`]s.
        pub reviewer: Option<user::Id>,
    }

    /// Field ordering a [`Page`] of [`Review`]s.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub enum OrderBy {
        /// Time of the last update.
        #[default]
        UpdatedAt,

        /// [`review::Rating`] value.
        Rating,
    }

    /// Total count of [`Review`]s.
    #[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
    pub struct TotalCount(i32);
}

#[cfg(test)]
mod spec {
    use super::AverageRating;

    #[test]
    fn average_rating_rounds_to_one_decimal_place() {
        assert_eq!(AverageRating::new(13.0 / 3.0), AverageRating::new(4.3));
        assert_eq!(f64::from(AverageRating::new(4.25)), 4.3);
        assert_eq!(f64::from(AverageRating::new(5.0)), 5.0);
        assert_eq!(f64::from(AverageRating::default()), 0.0);
    }
}
