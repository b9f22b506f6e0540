//! Domain definitions.

pub mod offer;
pub mod order;
pub mod profile;
pub mod review;
pub mod user;

pub use self::{
    offer::Offer, order::Order, profile::Profile, review::Review, user::User,
};
