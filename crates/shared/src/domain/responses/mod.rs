mod api;
mod coupon;
mod product;

pub use self::api::MessageResponse;
pub use self::coupon::{
    CouponCreatedResponse, CouponListResponse, CouponResponse, CouponStatus,
};
pub use self::product::{ProductListResponse, ProductResponse};
