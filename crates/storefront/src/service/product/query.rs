use crate::{
    abstract_trait::product::{
        repository::DynProductQueryRepository, service::ProductQueryServiceTrait,
    },
    domain::requests::{FindAllProducts, ProductFilter},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    domain::responses::{ProductListResponse, ProductResponse},
    errors::ServiceError,
    utils::{Method, OperationTracer},
};
use tracing::info;
use uuid::Uuid;

use super::command::PRODUCT_NOT_FOUND;

pub struct ProductQueryService {
    query: DynProductQueryRepository,
    tracer: OperationTracer,
}

impl ProductQueryService {
    pub fn new(query: DynProductQueryRepository, registry: &mut Registry) -> Self {
        let tracer = OperationTracer::new("product-query-service", registry);

        Self { query, tracer }
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all_for_admin(&self) -> Result<Vec<ProductResponse>, ServiceError> {
        let ctx = self.tracer.start(
            "find_all_products_admin",
            Method::Get,
            vec![KeyValue::new("component", "product")],
        );

        match self.query.find_all().await {
            Ok(products) => {
                self.tracer.success(&ctx, "Products retrieved");
                Ok(products.into_iter().map(ProductResponse::from).collect())
            }
            Err(e) => {
                self.tracer.failure(&ctx, &format!("Fetch failed: {e}"));
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn find_for_client(
        &self,
        req: &FindAllProducts,
    ) -> Result<ProductListResponse, ServiceError> {
        let filter = ProductFilter::try_from(req)?;

        let ctx = self.tracer.start(
            "find_products",
            Method::Get,
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("page", filter.page),
                KeyValue::new("limit", filter.limit),
                KeyValue::new("sort_by", filter.sort_by.column()),
            ],
        );

        match self.query.find_filtered(&filter).await {
            Ok((products, total)) => {
                info!("✅ Retrieved {} of {} products", products.len(), total);
                self.tracer.success(&ctx, "Products retrieved");

                let products = products.into_iter().map(ProductResponse::from).collect();
                Ok(ProductListResponse::new(
                    products,
                    filter.page,
                    filter.limit,
                    total,
                ))
            }
            Err(e) => {
                self.tracer.failure(&ctx, &format!("Fetch failed: {e}"));
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<ProductResponse, ServiceError> {
        let ctx = self.tracer.start(
            "find_product_by_id",
            Method::Get,
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        match self.query.find_by_id(id).await {
            Ok(Some(product)) => {
                self.tracer.success(&ctx, "Product retrieved");
                Ok(ProductResponse::from(product))
            }
            Ok(None) => {
                self.tracer.failure(&ctx, PRODUCT_NOT_FOUND);
                Err(ServiceError::NotFound(PRODUCT_NOT_FOUND.into()))
            }
            Err(e) => {
                self.tracer.failure(&ctx, &format!("Fetch failed: {e}"));
                Err(ServiceError::Repo(e))
            }
        }
    }
}
