use crate::{
    abstract_trait::media::UploadedImage,
    domain::requests::{CreateProductRequest, UpdateProductRequest},
    model::Product as ProductModel,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;
use uuid::Uuid;

pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandRepositoryTrait {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
        images: &[UploadedImage],
    ) -> Result<ProductModel, RepositoryError>;
    /// `None` when no product has the id.
    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<Option<ProductModel>, RepositoryError>;
    /// Returns the deleted row, `None` when no product has the id.
    async fn delete_product(&self, id: Uuid) -> Result<Option<ProductModel>, RepositoryError>;
}
