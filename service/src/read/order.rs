//! [`Order`] read model definition.
//!
//! [`Order`]: crate::domain::Order

#[cfg(doc)]
use crate::domain::{order, Order, User};

/// Counts of a business [`User`]'s [`Order`]s, split by [`order::Status`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Counts {
    /// Number of [`order::Status::InProgress`] [`Order`]s.
    pub in_progress: i32,

    /// Number of [`order::Status::Completed`] [`Order`]s.
    pub completed: i32,
}

pub mod list {
    //! [`Order`]s list definitions.

    use common::define_pagination;
    use derive_more::{From, Into};

    use crate::domain::{order, user};
    #[cfg(doc)]
    use crate::domain::{Order, User};

    define_pagination!(Cursor, Node, Filter);

    /// Node in a [`Connection`].
    pub type Node = order::Id;

    /// Cursor pointing to a specific [`Order`] in a list.
    pub type Cursor = order::Id;

    /// Filter for [`Selector`].
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter {
        /// ID of the [`User`] participating in the [`Order`]s, either as
        /// the customer or as the business party.
        pub party: Option<user::Id>,
    }

    /// Total count of [`Order`]s.
    #[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
    pub struct TotalCount(i32);
}
