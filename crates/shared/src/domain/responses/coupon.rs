use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
pub enum CouponStatus {
    Active,
    Expired,
}

impl CouponStatus {
    /// A coupon stays active until its end date has passed.
    pub fn at(end_date: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if end_date > now {
            CouponStatus::Active
        } else {
            CouponStatus::Expired
        }
    }
}

impl fmt::Display for CouponStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CouponStatus::Active => write!(f, "Active"),
            CouponStatus::Expired => write!(f, "Expired"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CouponResponse {
    pub id: Uuid,
    pub code: String,
    pub discount_percent: i32,
    pub usage_count: i32,
    pub usage_limit: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub status: CouponStatus,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CouponListResponse {
    pub success: bool,
    pub coupon_list: Vec<CouponResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct CouponCreatedResponse {
    pub success: bool,
    pub message: String,
    pub coupon: CouponResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn status_flips_once_end_date_passes() {
        let now = Utc::now();
        assert_eq!(
            CouponStatus::at(now + Duration::days(1), now),
            CouponStatus::Active
        );
        assert_eq!(CouponStatus::at(now, now), CouponStatus::Expired);
        assert_eq!(
            CouponStatus::at(now - Duration::seconds(1), now),
            CouponStatus::Expired
        );
    }
}
