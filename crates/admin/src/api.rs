use crate::error::AdminError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response, header::COOKIE};
use serde::{Serialize, de::DeserializeOwned};
use shared::{
    domain::responses::{
        CouponCreatedResponse, CouponListResponse, CouponResponse, MessageResponse,
    },
    errors::ErrorResponse,
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";

/// Body of `POST /api/coupon`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCoupon {
    pub code: String,
    pub discount_percent: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub usage_limit: i32,
}

pub type DynCouponApi = Arc<dyn CouponApi + Send + Sync>;

#[async_trait]
pub trait CouponApi {
    async fn list(&self) -> Result<Vec<CouponResponse>, AdminError>;
    async fn create(&self, coupon: &NewCoupon) -> Result<CouponResponse, AdminError>;
    /// Returns the server's confirmation message.
    async fn delete(&self, id: Uuid) -> Result<String, AdminError>;
}

pub struct HttpCouponApi {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpCouponApi {
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(COOKIE, format!("{ACCESS_TOKEN_COOKIE}={}", self.token))
    }

    async fn read<T: DeserializeOwned>(response: Response) -> Result<T, AdminError> {
        let status = response.status();
        debug!("coupon API replied {status}");

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.message)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });

        Err(AdminError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl CouponApi for HttpCouponApi {
    async fn list(&self) -> Result<Vec<CouponResponse>, AdminError> {
        let response = self
            .authorized(self.client.get(self.url("/api/coupon")))
            .send()
            .await?;

        let body: CouponListResponse = Self::read(response).await?;
        Ok(body.coupon_list)
    }

    async fn create(&self, coupon: &NewCoupon) -> Result<CouponResponse, AdminError> {
        let response = self
            .authorized(self.client.post(self.url("/api/coupon")))
            .json(coupon)
            .send()
            .await?;

        let body: CouponCreatedResponse = Self::read(response).await?;
        Ok(body.coupon)
    }

    async fn delete(&self, id: Uuid) -> Result<String, AdminError> {
        let response = self
            .authorized(self.client.delete(self.url(&format!("/api/coupon/{id}"))))
            .send()
            .await?;

        let body: MessageResponse = Self::read(response).await?;
        Ok(body.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let api = HttpCouponApi::new("http://localhost:3001/", "t");
        assert_eq!(api.url("/api/coupon"), "http://localhost:3001/api/coupon");
    }

    #[test]
    fn new_coupon_uses_camel_case() {
        let now = Utc::now();
        let value = serde_json::to_value(NewCoupon {
            code: "SPRING".into(),
            discount_percent: 15,
            start_date: now,
            end_date: now,
            usage_limit: 10,
        })
        .unwrap();

        assert_eq!(value["discountPercent"], 15);
        assert_eq!(value["usageLimit"], 10);
        assert!(value.get("startDate").is_some());
    }
}
