use crate::{domain::requests::CreateCouponRequest, model::Coupon as CouponModel};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;
use uuid::Uuid;

pub type DynCouponRepository = Arc<dyn CouponRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait CouponRepositoryTrait {
    async fn find_all(&self) -> Result<Vec<CouponModel>, RepositoryError>;
    async fn create_coupon(&self, req: &CreateCouponRequest)
    -> Result<CouponModel, RepositoryError>;
    /// `false` when no coupon has the id.
    async fn delete_coupon(&self, id: Uuid) -> Result<bool, RepositoryError>;
}
