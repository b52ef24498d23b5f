use crate::domain::requests::{CreateProductRequest, ImageUpload, UpdateProductRequest};
use async_trait::async_trait;
use shared::{
    domain::responses::{MessageResponse, ProductResponse},
    errors::ServiceError,
};
use std::sync::Arc;
use uuid::Uuid;

pub type DynProductCommandService = Arc<dyn ProductCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandServiceTrait {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
        images: Vec<ImageUpload>,
    ) -> Result<ProductResponse, ServiceError>;
    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<ProductResponse, ServiceError>;
    async fn delete_product(&self, id: Uuid) -> Result<MessageResponse, ServiceError>;
}
