mod repository;
mod service;

pub use self::repository::{CouponRepositoryTrait, DynCouponRepository};
pub use self::service::{CouponServiceTrait, DynCouponService};
