//! Terminal console for the storefront's coupon administration API.

pub mod api;
pub mod error;
pub mod store;
pub mod view;
