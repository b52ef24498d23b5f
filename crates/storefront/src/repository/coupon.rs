use crate::{
    abstract_trait::coupon::CouponRepositoryTrait, domain::requests::CreateCouponRequest,
    model::Coupon as CouponModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct CouponRepository {
    db: ConnectionPool,
}

impl CouponRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CouponRepositoryTrait for CouponRepository {
    async fn find_all(&self) -> Result<Vec<CouponModel>, RepositoryError> {
        let coupons = sqlx::query_as::<_, CouponModel>(
            r#"
            SELECT id, code, discount_percent, start_date, end_date,
                   usage_limit, usage_count, created_at
            FROM coupons
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch coupons: {:?}", e);
            RepositoryError::from(e)
        })?;

        info!("🎟️ Found {} coupons", coupons.len());
        Ok(coupons)
    }

    async fn create_coupon(
        &self,
        req: &CreateCouponRequest,
    ) -> Result<CouponModel, RepositoryError> {
        info!("🆕 Creating coupon: {}", req.code);

        let coupon = sqlx::query_as::<_, CouponModel>(
            r#"
            INSERT INTO coupons (code, discount_percent, start_date, end_date, usage_limit)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, code, discount_percent, start_date, end_date,
                      usage_limit, usage_count, created_at
            "#,
        )
        .bind(&req.code)
        .bind(req.discount_percent)
        .bind(req.start_date)
        .bind(req.end_date)
        .bind(req.usage_limit)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to create coupon {}: {:?}", req.code, e);
            RepositoryError::from(e)
        })?;

        Ok(coupon)
    }

    async fn delete_coupon(&self, id: Uuid) -> Result<bool, RepositoryError> {
        info!("🗑️ Deleting coupon ID: {}", id);

        let result = sqlx::query("DELETE FROM coupons WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete coupon {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
