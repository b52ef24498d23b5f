use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::domain::responses::ProductResponse;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub brand: String,
    pub description: String,
    pub category: String,
    pub gender: String,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub price: f64,
    pub stock: i32,
    pub images: Vec<String>,
    pub image_ids: Vec<String>,
    pub sold_count: i32,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(value: Product) -> Self {
        ProductResponse {
            id: value.id,
            name: value.name,
            brand: value.brand,
            description: value.description,
            category: value.category,
            gender: value.gender,
            sizes: value.sizes,
            colors: value.colors,
            price: value.price,
            stock: value.stock,
            images: value.images,
            sold_count: value.sold_count,
            rating: value.rating,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
