mod coupon;
mod product;

pub use self::coupon::CouponRepository;
pub use self::product::{ProductCommandRepository, ProductQueryRepository, ProductRepository};
