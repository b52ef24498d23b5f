mod coupon;
mod product;

pub use self::coupon::Coupon;
pub use self::product::Product;
