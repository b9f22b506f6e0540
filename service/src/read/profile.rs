//! [`Profile`] read model definition.
//!
//! [`Profile`]: crate::domain::Profile

pub mod list {
    //! [`Profile`]s list definitions.

    use common::define_pagination;
    use derive_more::{From, Into};

    use crate::domain::{profile, user};
    #[cfg(doc)]
    use crate::domain::Profile;

    define_pagination!(Cursor, Node, Filter);

    /// Node in a [`Connection`].
    pub type Node = user::Id;

    /// Cursor pointing to a specific [`Profile`] in a list.
    pub type Cursor = user::Id;

    /// Filter for [`Selector`].
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter {
        /// [`profile::Kind`] of the [`Profile`]s.
        pub kind: Option<profile::Kind>,
    }

    /// Total count of [`Profile`]s.
    #[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
    pub struct TotalCount(i32);
}
