//! [`Offer`] read model definition.
//!
//! [`Offer`]: crate::domain::Offer

pub mod list {
    //! [`Offer`]s list definitions.

    use common::{define_pagination, Price};
    use derive_more::{From, Into};

    use crate::domain::{offer, offer::detail, user};
    #[cfg(doc)]
    use crate::domain::{Offer, User};

    define_pagination!(Cursor, Node, Filter, sorted by OrderBy);

    /// Node in a [`Connection`].
    pub type Node = offer::Id;

    /// Cursor pointing to a specific [`Offer`] in a list.
    pub type Cursor = offer::Id;

    /// Filter for [`Selector`].
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// ID of the [`User`] owning the [`Offer`]s.
        pub owner: Option<user::Id>,

        /// Lowest acceptable minimum [`Price`] over an [`Offer`]'s
        /// [`detail::Detail`]s.
        pub min_price: Option<Price>,

        /// Highest acceptable minimum [`detail::DeliveryTime`] over an
        /// [`Offer`]'s [`detail::Detail`]s.
        pub max_delivery_time: Option<detail::DeliveryTime>,

        /// Text (or its part) to fuzzy search [`offer::Title`]s and
        /// [`offer::Description`]s for.
        pub search: Option<offer::Title>,
    }

    /// Field ordering a [`Page`] of [`Offer`]s.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub enum OrderBy {
        /// Time of the last update.
        #[default]
        UpdatedAt,

        /// Minimum [`Price`] over an [`Offer`]'s [`detail::Detail`]s.
        MinPrice,
    }

    /// Total count of [`Offer`]s.
    #[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
    pub struct TotalCount(i32);
}
