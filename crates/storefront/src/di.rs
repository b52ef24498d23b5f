use crate::{
    abstract_trait::{
        coupon::{DynCouponRepository, DynCouponService},
        media::DynMediaStore,
        product::repository::{DynProductCommandRepository, DynProductQueryRepository},
    },
    repository::{CouponRepository, ProductRepository},
    service::{CouponService, ProductService},
};
use prometheus_client::registry::Registry;
use shared::config::ConnectionPool;
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub product_service: ProductService,
    pub coupon_service: DynCouponService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("product_service", &self.product_service)
            .field("coupon_service", &"Arc<dyn CouponServiceTrait>")
            .finish()
    }
}

/// Storage and media backends the services are built on.
#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub product_query: DynProductQueryRepository,
    pub product_command: DynProductCommandRepository,
    pub coupon: DynCouponRepository,
    pub media: DynMediaStore,
}

impl DependenciesInjectDeps {
    pub fn from_pool(pool: ConnectionPool, media: DynMediaStore) -> Self {
        let ProductRepository { query, command } = ProductRepository::new(pool.clone());
        let coupon = Arc::new(CouponRepository::new(pool)) as DynCouponRepository;

        Self {
            product_query: query,
            product_command: command,
            coupon,
            media,
        }
    }
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Self {
        let DependenciesInjectDeps {
            product_query,
            product_command,
            coupon,
            media,
        } = deps;

        let product_service = ProductService::new(product_query, product_command, media, registry);
        let coupon_service = Arc::new(CouponService::new(coupon, registry)) as DynCouponService;

        Self {
            product_service,
            coupon_service,
        }
    }
}
