use crate::{
    api::{DynCouponApi, NewCoupon},
    error::AdminError,
};
use shared::domain::responses::CouponResponse;
use tracing::{error, warn};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Declined,
    Deleted,
    Failed(String),
}

/// Client-side coupon state: the last fetched list plus a loading flag that
/// is raised for the duration of every API call.
pub struct CouponStore {
    api: DynCouponApi,
    coupon_list: Vec<CouponResponse>,
    is_loading: bool,
}

impl CouponStore {
    pub fn new(api: DynCouponApi) -> Self {
        Self {
            api,
            coupon_list: Vec::new(),
            is_loading: false,
        }
    }

    pub fn coupons(&self) -> &[CouponResponse] {
        &self.coupon_list
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn find(&self, id: Uuid) -> Option<&CouponResponse> {
        self.coupon_list.iter().find(|c| c.id == id)
    }

    /// Replaces the list on success; a failed fetch keeps the previous list.
    pub async fn fetch_all_coupons(&mut self) -> Result<(), AdminError> {
        self.is_loading = true;
        let result = self.api.list().await;
        self.is_loading = false;

        self.coupon_list = result.inspect_err(|e| error!("Failed to fetch coupons: {e}"))?;
        Ok(())
    }

    /// `true` when the server confirmed the delete.
    pub async fn delete_coupon(&mut self, id: Uuid) -> Result<bool, AdminError> {
        self.is_loading = true;
        let result = self.api.delete(id).await;
        self.is_loading = false;

        result
            .map(|_| true)
            .inspect_err(|e| error!("Failed to delete coupon {id}: {e}"))
    }

    pub async fn create_coupon(&mut self, coupon: &NewCoupon) -> Result<CouponResponse, AdminError> {
        self.is_loading = true;
        let result = self.api.create(coupon).await;
        self.is_loading = false;

        result
    }

    /// Asks `confirm` first. The list is refetched only after a successful
    /// delete; a declined or failed one leaves it untouched.
    pub async fn confirm_and_delete<F>(&mut self, id: Uuid, confirm: F) -> DeleteOutcome
    where
        F: FnOnce() -> bool,
    {
        if !confirm() {
            return DeleteOutcome::Declined;
        }

        match self.delete_coupon(id).await {
            Ok(_) => {
                if let Err(e) = self.fetch_all_coupons().await {
                    warn!("Coupon deleted but the list could not be refreshed: {e}");
                }
                DeleteOutcome::Deleted
            }
            Err(e) => DeleteOutcome::Failed(e.to_string()),
        }
    }
}
