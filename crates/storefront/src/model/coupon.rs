use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::domain::responses::{CouponResponse, CouponStatus};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Coupon {
    pub id: Uuid,
    pub code: String,
    pub discount_percent: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub usage_limit: i32,
    pub usage_count: i32,
    pub created_at: DateTime<Utc>,
}

impl Coupon {
    pub fn into_response(self, now: DateTime<Utc>) -> CouponResponse {
        CouponResponse {
            status: CouponStatus::at(self.end_date, now),
            id: self.id,
            code: self.code,
            discount_percent: self.discount_percent,
            usage_count: self.usage_count,
            usage_limit: self.usage_limit,
            start_date: self.start_date,
            end_date: self.end_date,
            created_at: self.created_at,
        }
    }
}
