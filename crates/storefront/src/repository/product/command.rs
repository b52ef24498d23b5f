use crate::{
    abstract_trait::{
        media::UploadedImage, product::repository::ProductCommandRepositoryTrait,
    },
    domain::requests::{CreateProductRequest, UpdateProductRequest},
    model::Product as ProductModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
        images: &[UploadedImage],
    ) -> Result<ProductModel, RepositoryError> {
        info!("🆕 Creating product: {}", req.name);

        let urls: Vec<String> = images.iter().map(|i| i.url.clone()).collect();
        let public_ids: Vec<String> = images.iter().map(|i| i.public_id.clone()).collect();

        let product = sqlx::query_as::<_, ProductModel>(
            r#"
            INSERT INTO products (
                name, brand, description, category, gender,
                sizes, colors, price, stock, images, image_ids
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&req.name)
        .bind(&req.brand)
        .bind(&req.description)
        .bind(&req.category)
        .bind(&req.gender)
        .bind(&req.sizes)
        .bind(&req.colors)
        .bind(req.price)
        .bind(req.stock)
        .bind(&urls)
        .bind(&public_ids)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to create product {}: {:?}", req.name, e);
            RepositoryError::from(e)
        })?;

        info!("✅ Product created with ID: {}", product.id);
        Ok(product)
    }

    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<Option<ProductModel>, RepositoryError> {
        info!("🔄 Updating product ID: {}", req.id);

        let product = sqlx::query_as::<_, ProductModel>(
            r#"
            UPDATE products
            SET name = $2,
                brand = $3,
                description = $4,
                category = $5,
                gender = $6,
                sizes = $7,
                colors = $8,
                price = $9,
                stock = $10,
                rating = COALESCE($11, rating),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(req.id)
        .bind(&req.name)
        .bind(&req.brand)
        .bind(&req.description)
        .bind(&req.category)
        .bind(&req.gender)
        .bind(&req.sizes)
        .bind(&req.colors)
        .bind(req.price)
        .bind(req.stock)
        .bind(req.rating)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to update product {}: {:?}", req.id, e);
            RepositoryError::from(e)
        })?;

        Ok(product)
    }

    async fn delete_product(&self, id: Uuid) -> Result<Option<ProductModel>, RepositoryError> {
        info!("🗑️ Deleting product ID: {}", id);

        let product = sqlx::query_as::<_, ProductModel>(
            "DELETE FROM products WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to delete product {}: {:?}", id, e);
            RepositoryError::from(e)
        })?;

        Ok(product)
    }
}
