mod coupon;
mod product;

pub use self::coupon::CouponService;
pub use self::product::{ProductCommandService, ProductQueryService, ProductService};
