#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, body::Body, http::Request, response::Response};
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::Value;
use shared::{
    abstract_trait::JwtServiceTrait,
    config::{JwtConfig, ROLE_SUPER_ADMIN},
    errors::RepositoryError,
};
use std::{
    cmp::Ordering,
    sync::{Arc, Mutex},
};
use storefront::{
    abstract_trait::{
        coupon::{CouponRepositoryTrait, DynCouponRepository},
        media::{DynMediaStore, MediaStoreTrait, UploadedImage},
        product::repository::{
            DynProductCommandRepository, DynProductQueryRepository,
            ProductCommandRepositoryTrait, ProductQueryRepositoryTrait,
        },
    },
    di::DependenciesInjectDeps,
    domain::requests::{
        CreateCouponRequest, CreateProductRequest, ImageUpload, ProductFilter, SortField,
        SortOrder, UpdateProductRequest,
    },
    handler::AppRouter,
    media::MediaError,
    model::{Coupon, Product},
    state::AppState,
};
use tower::ServiceExt;
use uuid::Uuid;

pub const JWT_SECRET: &str = "test-secret";
pub const ORIGIN: &str = "http://localhost:3000";

#[derive(Default)]
pub struct InMemoryProducts {
    pub rows: Mutex<Vec<Product>>,
    pub fail_inserts: bool,
}

impl InMemoryProducts {
    pub fn failing_inserts() -> Self {
        Self {
            fail_inserts: true,
            ..Self::default()
        }
    }

    pub fn seed(&self, product: Product) {
        self.rows.lock().unwrap().push(product);
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

fn product_matches(product: &Product, filter: &ProductFilter) -> bool {
    let any_ci = |wanted: &[String], value: &str| {
        wanted.is_empty() || wanted.iter().any(|w| w.eq_ignore_ascii_case(value))
    };
    let overlaps =
        |wanted: &[String], have: &[String]| wanted.is_empty() || wanted.iter().any(|w| have.contains(w));

    product.price >= filter.min_price
        && filter.max_price.is_none_or(|max| product.price <= max)
        && any_ci(&filter.categories, &product.category)
        && any_ci(&filter.brands, &product.brand)
        && overlaps(&filter.sizes, &product.sizes)
        && overlaps(&filter.colors, &product.colors)
}

fn compare(a: &Product, b: &Product, field: SortField) -> Ordering {
    match field {
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        SortField::Name => a.name.cmp(&b.name),
        SortField::Price => a.price.total_cmp(&b.price),
        SortField::Rating => a.rating.total_cmp(&b.rating),
        SortField::SoldCount => a.sold_count.cmp(&b.sold_count),
        SortField::Stock => a.stock.cmp(&b.stock),
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for InMemoryProducts {
    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn find_filtered(
        &self,
        filter: &ProductFilter,
    ) -> Result<(Vec<Product>, i64), RepositoryError> {
        let mut rows: Vec<Product> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| product_matches(p, filter))
            .cloned()
            .collect();

        rows.sort_by(|a, b| {
            let ord = compare(a, b, filter.sort_by);
            match filter.sort_order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });

        let total = rows.len() as i64;
        let page = rows
            .into_iter()
            .skip(filter.offset() as usize)
            .take(filter.limit as usize)
            .collect();

        Ok((page, total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, RepositoryError> {
        Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for InMemoryProducts {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
        images: &[UploadedImage],
    ) -> Result<Product, RepositoryError> {
        if self.fail_inserts {
            return Err(RepositoryError::Sqlx(sqlx::Error::PoolTimedOut));
        }

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            name: req.name.clone(),
            brand: req.brand.clone(),
            description: req.description.clone(),
            category: req.category.clone(),
            gender: req.gender.clone(),
            sizes: req.sizes.clone(),
            colors: req.colors.clone(),
            price: req.price,
            stock: req.stock,
            images: images.iter().map(|i| i.url.clone()).collect(),
            image_ids: images.iter().map(|i| i.public_id.clone()).collect(),
            sold_count: 0,
            rating: 0.0,
            created_at: now,
            updated_at: now,
        };

        self.rows.lock().unwrap().push(product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(product) = rows.iter_mut().find(|p| p.id == req.id) else {
            return Ok(None);
        };

        product.name = req.name.clone();
        product.brand = req.brand.clone();
        product.description = req.description.clone();
        product.category = req.category.clone();
        product.gender = req.gender.clone();
        product.sizes = req.sizes.clone();
        product.colors = req.colors.clone();
        product.price = req.price;
        product.stock = req.stock;
        if let Some(rating) = req.rating {
            product.rating = rating;
        }
        product.updated_at = Utc::now();

        Ok(Some(product.clone()))
    }

    async fn delete_product(&self, id: Uuid) -> Result<Option<Product>, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let position = rows.iter().position(|p| p.id == id);
        Ok(position.map(|i| rows.remove(i)))
    }
}

/// Uploads fail for any file whose name contains "broken".
#[derive(Default)]
pub struct FakeMedia {
    pub uploaded: Mutex<Vec<String>>,
    pub destroyed: Mutex<Vec<String>>,
}

impl FakeMedia {
    pub fn destroyed(&self) -> Vec<String> {
        let mut ids = self.destroyed.lock().unwrap().clone();
        ids.sort();
        ids
    }

    pub fn uploaded(&self) -> Vec<String> {
        let mut ids = self.uploaded.lock().unwrap().clone();
        ids.sort();
        ids
    }
}

#[async_trait]
impl MediaStoreTrait for FakeMedia {
    async fn upload(&self, image: &ImageUpload) -> Result<UploadedImage, MediaError> {
        if image.file_name.contains("broken") {
            return Err(MediaError::Rejected {
                status: 400,
                message: "Invalid image file".into(),
            });
        }

        let public_id = format!("ecommerce/{}", image.file_name);
        self.uploaded.lock().unwrap().push(public_id.clone());

        Ok(UploadedImage {
            url: format!("https://cdn.test/{public_id}"),
            public_id,
        })
    }

    async fn destroy(&self, public_id: &str) -> Result<(), MediaError> {
        self.destroyed.lock().unwrap().push(public_id.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryCoupons {
    pub rows: Mutex<Vec<Coupon>>,
}

impl InMemoryCoupons {
    pub fn seed(&self, coupon: Coupon) {
        self.rows.lock().unwrap().push(coupon);
    }
}

#[async_trait]
impl CouponRepositoryTrait for InMemoryCoupons {
    async fn find_all(&self) -> Result<Vec<Coupon>, RepositoryError> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn create_coupon(&self, req: &CreateCouponRequest) -> Result<Coupon, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|c| c.code == req.code) {
            return Err(RepositoryError::AlreadyExists("coupons_code_key".into()));
        }

        let coupon = Coupon {
            id: Uuid::new_v4(),
            code: req.code.clone(),
            discount_percent: req.discount_percent,
            start_date: req.start_date,
            end_date: req.end_date,
            usage_limit: req.usage_limit,
            usage_count: 0,
            created_at: Utc::now(),
        };
        rows.push(coupon.clone());
        Ok(coupon)
    }

    async fn delete_coupon(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|c| c.id != id);
        Ok(rows.len() < before)
    }
}

pub struct TestApp {
    pub router: Router,
    pub products: Arc<InMemoryProducts>,
    pub coupons: Arc<InMemoryCoupons>,
    pub media: Arc<FakeMedia>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_products(InMemoryProducts::default())
    }

    pub fn with_products(products: InMemoryProducts) -> Self {
        let products = Arc::new(products);
        let coupons = Arc::new(InMemoryCoupons::default());
        let media = Arc::new(FakeMedia::default());

        let deps = DependenciesInjectDeps {
            product_query: products.clone() as DynProductQueryRepository,
            product_command: products.clone() as DynProductCommandRepository,
            coupon: coupons.clone() as DynCouponRepository,
            media: media.clone() as DynMediaStore,
        };

        let state = AppState::new(deps, JWT_SECRET);
        let router = AppRouter::build(state, ORIGIN).expect("router builds");

        Self {
            router,
            products,
            coupons,
            media,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (u16, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        read_json(response).await
    }
}

pub async fn read_json(response: Response) -> (u16, Value) {
    let status = response.status().as_u16();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub fn token(role: &str) -> String {
    JwtConfig::new(JWT_SECRET)
        .generate_token("user-1", "user@shop.test", role)
        .unwrap()
}

pub fn admin_cookie() -> String {
    format!("accessToken={}", token(ROLE_SUPER_ADMIN))
}

pub fn customer_cookie() -> String {
    format!("accessToken={}", token("USER"))
}

pub fn product(name: &str, category: &str, brand: &str, price: f64) -> Product {
    let now = Utc::now();
    Product {
        id: Uuid::new_v4(),
        name: name.into(),
        brand: brand.into(),
        description: format!("{name} description"),
        category: category.into(),
        gender: "Unisex".into(),
        sizes: vec!["M".into(), "L".into()],
        colors: vec!["black".into()],
        price,
        stock: 10,
        images: vec![format!("https://cdn.test/ecommerce/{name}.png")],
        image_ids: vec![format!("ecommerce/{name}.png")],
        sold_count: 0,
        rating: 0.0,
        created_at: now,
        updated_at: now,
    }
}

pub const BOUNDARY: &str = "storefront-test-boundary";

/// Builds a multipart body from text fields and `(file_name, bytes)` images.
pub fn multipart_body(fields: &[(&str, &str)], images: &[(&str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }

    for (file_name, bytes) in images {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"images\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_request(method: &str, uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("cookie", admin_cookie())
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub const PRODUCT_FIELDS: &[(&str, &str)] = &[
    ("name", "Runner 2"),
    ("brand", "Acme"),
    ("description", "Light running shoe"),
    ("category", "Shoes"),
    ("gender", "Unisex"),
    ("sizes", "40,41,,42"),
    ("colors", "red,black"),
    ("price", "79.99"),
    ("stock", "25"),
];
