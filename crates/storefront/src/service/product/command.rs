use crate::{
    abstract_trait::{
        media::{DynMediaStore, UploadedImage},
        product::{
            repository::DynProductCommandRepository, service::ProductCommandServiceTrait,
        },
    },
    domain::requests::{CreateProductRequest, ImageUpload, UpdateProductRequest},
};
use async_trait::async_trait;
use futures::future::join_all;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    domain::responses::{MessageResponse, ProductResponse},
    errors::ServiceError,
    utils::{Method, OperationTracer},
};
use tracing::{error, info, warn};
use uuid::Uuid;

pub const PRODUCT_NOT_FOUND: &str = "Product not found!";

pub struct ProductCommandService {
    command: DynProductCommandRepository,
    media: DynMediaStore,
    tracer: OperationTracer,
}

impl ProductCommandService {
    pub fn new(
        command: DynProductCommandRepository,
        media: DynMediaStore,
        registry: &mut Registry,
    ) -> Self {
        let tracer = OperationTracer::new("product-command-service", registry);

        Self {
            command,
            media,
            tracer,
        }
    }

    /// Uploads every image concurrently. When any upload fails the ones
    /// that went through are destroyed before the error is returned.
    async fn upload_all(
        &self,
        images: &[ImageUpload],
    ) -> Result<Vec<UploadedImage>, ServiceError> {
        let results = join_all(images.iter().map(|image| self.media.upload(image))).await;

        let mut uploaded = Vec::with_capacity(results.len());
        let mut failure = None;

        for result in results {
            match result {
                Ok(image) => uploaded.push(image),
                Err(e) => {
                    error!("❌ Image upload failed: {e}");
                    if failure.is_none() {
                        failure = Some(e);
                    }
                }
            }
        }

        if let Some(e) = failure {
            self.destroy_all(&uploaded).await;
            return Err(ServiceError::Media(e.to_string()));
        }

        Ok(uploaded)
    }

    /// Best effort: failures are logged and swallowed.
    async fn destroy_all(&self, images: &[UploadedImage]) {
        if images.is_empty() {
            return;
        }

        let results =
            join_all(images.iter().map(|image| self.media.destroy(&image.public_id))).await;

        for (image, result) in images.iter().zip(results) {
            match result {
                Ok(()) => info!("🧹 Destroyed image {}", image.public_id),
                Err(e) => warn!("⚠️ Could not destroy image {}: {e}", image.public_id),
            }
        }
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
        images: Vec<ImageUpload>,
    ) -> Result<ProductResponse, ServiceError> {
        let ctx = self.tracer.start(
            "create_product",
            Method::Post,
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.name", req.name.clone()),
                KeyValue::new("product.images", images.len() as i64),
            ],
        );

        let uploaded = match self.upload_all(&images).await {
            Ok(uploaded) => uploaded,
            Err(e) => {
                self.tracer.failure(&ctx, "Image upload failed");
                return Err(e);
            }
        };

        match self.command.create_product(req, &uploaded).await {
            Ok(product) => {
                self.tracer.success(&ctx, "Product created");
                Ok(ProductResponse::from(product))
            }
            Err(e) => {
                self.destroy_all(&uploaded).await;
                self.tracer.failure(&ctx, &format!("Insert failed: {e}"));
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<ProductResponse, ServiceError> {
        let ctx = self.tracer.start(
            "update_product",
            Method::Put,
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", req.id.to_string()),
            ],
        );

        match self.command.update_product(req).await {
            Ok(Some(product)) => {
                self.tracer.success(&ctx, "Product updated");
                Ok(ProductResponse::from(product))
            }
            Ok(None) => {
                self.tracer.failure(&ctx, PRODUCT_NOT_FOUND);
                Err(ServiceError::NotFound(PRODUCT_NOT_FOUND.into()))
            }
            Err(e) => {
                self.tracer.failure(&ctx, &format!("Update failed: {e}"));
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn delete_product(&self, id: Uuid) -> Result<MessageResponse, ServiceError> {
        let ctx = self.tracer.start(
            "delete_product",
            Method::Delete,
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        let product = match self.command.delete_product(id).await {
            Ok(Some(product)) => product,
            Ok(None) => {
                self.tracer.failure(&ctx, PRODUCT_NOT_FOUND);
                return Err(ServiceError::NotFound(PRODUCT_NOT_FOUND.into()));
            }
            Err(e) => {
                self.tracer.failure(&ctx, &format!("Delete failed: {e}"));
                return Err(ServiceError::Repo(e));
            }
        };

        let images: Vec<UploadedImage> = product
            .image_ids
            .into_iter()
            .zip(product.images)
            .map(|(public_id, url)| UploadedImage { url, public_id })
            .collect();
        self.destroy_all(&images).await;

        self.tracer.success(&ctx, "Product deleted");
        Ok(MessageResponse::ok("Product deleted successfully!"))
    }
}
