use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
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
    pub sold_count: i32,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One page of the client-facing product listing.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub success: bool,
    pub products: Vec<ProductResponse>,
    pub current_page: i64,
    pub total_page: i64,
    pub total_products: i64,
}

impl ProductListResponse {
    pub fn new(products: Vec<ProductResponse>, page: i64, limit: i64, total: i64) -> Self {
        Self {
            success: true,
            products,
            current_page: page,
            total_page: total_pages(total, limit),
            total_products: total,
        }
    }
}

fn total_pages(total: i64, limit: i64) -> i64 {
    if limit <= 0 || total <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(95, 20), 5);
    }

    #[test]
    fn listing_serializes_with_client_field_names() {
        let page = ProductListResponse::new(vec![], 2, 10, 31);
        let json = serde_json::to_value(&page).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["currentPage"], 2);
        assert_eq!(json["totalPage"], 4);
        assert_eq!(json["totalProducts"], 31);
    }
}
