mod coupon;
mod product;

pub use self::coupon::CreateCouponRequest;
pub use self::product::{
    CreateProductRequest, FindAllProducts, FormFields, ImageUpload, ProductFilter,
    ProductFormSchema, SortField, SortOrder, UpdateProductRequest, split_csv,
};
