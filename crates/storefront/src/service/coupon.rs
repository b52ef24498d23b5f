use crate::{
    abstract_trait::coupon::{CouponServiceTrait, DynCouponRepository},
    domain::requests::CreateCouponRequest,
    middleware::validate::validation_messages,
};
use async_trait::async_trait;
use chrono::Utc;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    domain::responses::{CouponCreatedResponse, CouponListResponse, MessageResponse},
    errors::{RepositoryError, ServiceError},
    utils::{Method, OperationTracer},
};
use uuid::Uuid;
use validator::Validate;

const COUPON_NOT_FOUND: &str = "Coupon not found!";

pub struct CouponService {
    repository: DynCouponRepository,
    tracer: OperationTracer,
}

impl CouponService {
    pub fn new(repository: DynCouponRepository, registry: &mut Registry) -> Self {
        let tracer = OperationTracer::new("coupon-service", registry);

        Self { repository, tracer }
    }
}

#[async_trait]
impl CouponServiceTrait for CouponService {
    async fn find_all(&self) -> Result<CouponListResponse, ServiceError> {
        let ctx = self.tracer.start(
            "find_all_coupons",
            Method::Get,
            vec![KeyValue::new("component", "coupon")],
        );

        match self.repository.find_all().await {
            Ok(coupons) => {
                self.tracer.success(&ctx, "Coupons retrieved");
                let now = Utc::now();
                Ok(CouponListResponse {
                    success: true,
                    coupon_list: coupons.into_iter().map(|c| c.into_response(now)).collect(),
                })
            }
            Err(e) => {
                self.tracer.failure(&ctx, &format!("Fetch failed: {e}"));
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn create_coupon(
        &self,
        req: &CreateCouponRequest,
    ) -> Result<CouponCreatedResponse, ServiceError> {
        req.validate()
            .map_err(|e| ServiceError::Validation(validation_messages(&e)))?;

        let ctx = self.tracer.start(
            "create_coupon",
            Method::Post,
            vec![
                KeyValue::new("component", "coupon"),
                KeyValue::new("coupon.code", req.code.clone()),
            ],
        );

        match self.repository.create_coupon(req).await {
            Ok(coupon) => {
                self.tracer.success(&ctx, "Coupon created");
                Ok(CouponCreatedResponse {
                    success: true,
                    message: "Coupon created successfully!".into(),
                    coupon: coupon.into_response(Utc::now()),
                })
            }
            Err(RepositoryError::AlreadyExists(_)) => {
                self.tracer.failure(&ctx, "Duplicate coupon code");
                Err(ServiceError::Repo(RepositoryError::AlreadyExists(format!(
                    "Coupon code '{}' already exists",
                    req.code
                ))))
            }
            Err(e) => {
                self.tracer.failure(&ctx, &format!("Insert failed: {e}"));
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn delete_coupon(&self, id: Uuid) -> Result<MessageResponse, ServiceError> {
        let ctx = self.tracer.start(
            "delete_coupon",
            Method::Delete,
            vec![
                KeyValue::new("component", "coupon"),
                KeyValue::new("coupon.id", id.to_string()),
            ],
        );

        match self.repository.delete_coupon(id).await {
            Ok(true) => {
                self.tracer.success(&ctx, "Coupon deleted");
                Ok(MessageResponse::ok("Coupon deleted successfully!"))
            }
            Ok(false) => {
                self.tracer.failure(&ctx, COUPON_NOT_FOUND);
                Err(ServiceError::NotFound(COUPON_NOT_FOUND.into()))
            }
            Err(e) => {
                self.tracer.failure(&ctx, &format!("Delete failed: {e}"));
                Err(ServiceError::Repo(e))
            }
        }
    }
}
