use crate::{
    abstract_trait::product::repository::ProductQueryRepositoryTrait,
    domain::requests::ProductFilter, model::Product as ProductModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::{Postgres, QueryBuilder};
use tracing::{error, info};
use uuid::Uuid;

const PRODUCT_COLUMNS: &str = "id, name, brand, description, category, gender, sizes, colors, \
     price, stock, images, image_ids, sold_count, rating, created_at, updated_at";

#[derive(Clone)]
pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

/// Appends the WHERE clause shared by the page query and the count query.
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
    builder.push(" WHERE price >= ").push_bind(filter.min_price);

    if let Some(max_price) = filter.max_price {
        builder.push(" AND price <= ").push_bind(max_price);
    }

    if !filter.categories.is_empty() {
        builder
            .push(" AND LOWER(category) = ANY(")
            .push_bind(lowercase(&filter.categories))
            .push(")");
    }

    if !filter.brands.is_empty() {
        builder
            .push(" AND LOWER(brand) = ANY(")
            .push_bind(lowercase(&filter.brands))
            .push(")");
    }

    if !filter.sizes.is_empty() {
        builder
            .push(" AND sizes && ")
            .push_bind(filter.sizes.clone())
            .push("::TEXT[]");
    }

    if !filter.colors.is_empty() {
        builder
            .push(" AND colors && ")
            .push_bind(filter.colors.clone())
            .push("::TEXT[]");
    }
}

fn lowercase(values: &[String]) -> Vec<String> {
    values.iter().map(|v| v.to_lowercase()).collect()
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_all(&self) -> Result<Vec<ProductModel>, RepositoryError> {
        info!("📦 Fetching every product for the admin listing");

        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC");

        let products = sqlx::query_as::<_, ProductModel>(&sql)
            .fetch_all(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch products: {:?}", e);
                RepositoryError::from(e)
            })?;

        Ok(products)
    }

    async fn find_filtered(
        &self,
        filter: &ProductFilter,
    ) -> Result<(Vec<ProductModel>, i64), RepositoryError> {
        info!(
            "🔍 Fetching products | page: {}, limit: {}, sort: {} {}",
            filter.page,
            filter.limit,
            filter.sort_by.column(),
            filter.sort_order.sql()
        );

        let mut list = QueryBuilder::<Postgres>::new(format!(
            "SELECT {PRODUCT_COLUMNS} FROM products"
        ));
        push_filters(&mut list, filter);
        // column and direction come from closed enums, never from raw input
        list.push(format!(
            " ORDER BY {} {}, id ASC",
            filter.sort_by.column(),
            filter.sort_order.sql()
        ));
        list.push(" LIMIT ")
            .push_bind(filter.limit)
            .push(" OFFSET ")
            .push_bind(filter.offset());

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products");
        push_filters(&mut count, filter);

        let (products, total) = tokio::try_join!(
            list.build_query_as::<ProductModel>().fetch_all(&self.db),
            count.build_query_scalar::<i64>().fetch_one(&self.db),
        )
        .map_err(|e| {
            error!("❌ Failed to fetch filtered products: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok((products, total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProductModel>, RepositoryError> {
        info!("🆔 Fetching product by ID: {}", id);

        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");

        let product = sqlx::query_as::<_, ProductModel>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch product {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::requests::{SortField, SortOrder};

    #[test]
    fn default_filter_only_bounds_price() {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products");
        push_filters(&mut builder, &ProductFilter::default());

        assert_eq!(
            builder.sql(),
            "SELECT COUNT(*) FROM products WHERE price >= $1"
        );
    }

    #[test]
    fn every_filter_becomes_a_conjunct() {
        let filter = ProductFilter {
            categories: vec!["Shoes".into()],
            brands: vec!["Acme".into()],
            sizes: vec!["M".into()],
            colors: vec!["red".into()],
            max_price: Some(50.0),
            sort_by: SortField::Price,
            sort_order: SortOrder::Asc,
            ..ProductFilter::default()
        };

        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products");
        push_filters(&mut builder, &filter);

        assert_eq!(
            builder.sql(),
            "SELECT COUNT(*) FROM products WHERE price >= $1 AND price <= $2 \
             AND LOWER(category) = ANY($3) AND LOWER(brand) = ANY($4) \
             AND sizes && $5::TEXT[] AND colors && $6::TEXT[]"
        );
    }
}
