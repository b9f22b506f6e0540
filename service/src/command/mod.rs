//! [`Command`] definition.

pub mod authorize_user_session;
pub mod create_offer;
pub mod create_order;
pub mod create_review;
pub mod create_user;
pub mod create_user_session;
pub mod delete_offer;
pub mod delete_order;
pub mod delete_review;
pub mod update_offer;
pub mod update_order_status;
pub mod update_profile;
pub mod update_review;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    authorize_user_session::AuthorizeUserSession, create_offer::CreateOffer,
    create_order::CreateOrder, create_review::CreateReview,
    create_user::CreateUser, create_user_session::CreateUserSession,
    delete_offer::DeleteOffer, delete_order::DeleteOrder,
    delete_review::DeleteReview, update_offer::UpdateOffer,
    update_order_status::UpdateOrderStatus, update_profile::UpdateProfile,
    update_review::UpdateReview,
};
