pub mod coupon;
pub mod media;
pub mod product;
