use crate::domain::requests::CreateCouponRequest;
use async_trait::async_trait;
use shared::{
    domain::responses::{CouponCreatedResponse, CouponListResponse, MessageResponse},
    errors::ServiceError,
};
use std::sync::Arc;
use uuid::Uuid;

pub type DynCouponService = Arc<dyn CouponServiceTrait + Send + Sync>;

#[async_trait]
pub trait CouponServiceTrait {
    async fn find_all(&self) -> Result<CouponListResponse, ServiceError>;
    async fn create_coupon(
        &self,
        req: &CreateCouponRequest,
    ) -> Result<CouponCreatedResponse, ServiceError>;
    async fn delete_coupon(&self, id: Uuid) -> Result<MessageResponse, ServiceError>;
}
