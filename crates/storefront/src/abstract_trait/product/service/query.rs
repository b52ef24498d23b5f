use crate::domain::requests::FindAllProducts;
use async_trait::async_trait;
use shared::{
    domain::responses::{ProductListResponse, ProductResponse},
    errors::ServiceError,
};
use std::sync::Arc;
use uuid::Uuid;

pub type DynProductQueryService = Arc<dyn ProductQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryServiceTrait {
    async fn find_all_for_admin(&self) -> Result<Vec<ProductResponse>, ServiceError>;
    async fn find_for_client(
        &self,
        req: &FindAllProducts,
    ) -> Result<ProductListResponse, ServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<ProductResponse, ServiceError>;
}
