//! Read entities definitions.

pub mod offer;
pub mod order;
pub mod profile;
pub mod review;
