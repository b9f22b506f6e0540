//! GraphQL API definitions.

mod mutation;
pub mod offer;
pub mod order;
pub mod profile;
mod query;
pub mod review;
pub mod scalar;
pub mod stats;
mod subscription;
pub mod user;

use juniper::GraphQLEnum;

use crate::define_error;

pub use self::{
    mutation::Mutation, offer::Offer, order::Order, profile::Profile,
    query::Query, review::Review, subscription::Subscription, user::User,
};

/// GraphQL schema.
pub type Schema = juniper::RootNode<'static, Query, Mutation, Subscription>;

/// Direction of sorting applied to a list.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
pub enum SortDirection {
    /// From the lowest values to the highest ones.
    Ascending,

    /// From the highest values to the lowest ones.
    Descending,
}

impl From<SortDirection> for common::pagination::Order {
    fn from(value: SortDirection) -> Self {
        match value {
            SortDirection::Ascending => Self::Ascending,
            SortDirection::Descending => Self::Descending,
        }
    }
}

define_error! {
    enum PrivilegeError {
        #[code = "NOT_ADMIN"]
        #[status = FORBIDDEN]
        #[message = "Authenticated `User` must be an administrator"]
        Admin,

        #[code = "NOT_BUSINESS"]
        #[status = FORBIDDEN]
        #[message = "Authenticated `User` must have a business `Profile`"]
        Business,

        #[code = "NOT_CUSTOMER"]
        #[status = FORBIDDEN]
        #[message = "Authenticated `User` must have a customer `Profile`"]
        Customer,

        #[code = "NOT_OWNER"]
        #[status = FORBIDDEN]
        #[message = "Authenticated `User` must be the owner"]
        Owner,

        #[code = "NOT_PARTICIPANT"]
        #[status = FORBIDDEN]
        #[message = "Authenticated `User` must be a party of the `Order`"]
        Participant,
    }
}

define_error! {
    enum PaginationError {
        #[code = "AMBIGUOUS_PAGINATION_ARGUMENTS"]
        #[status = BAD_REQUEST]
        #[message = "Ambiguous pagination arguments"]
        Ambiguous,
    }
}
