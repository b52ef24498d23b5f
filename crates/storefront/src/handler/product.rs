use crate::{
    abstract_trait::product::service::{DynProductCommandService, DynProductQueryService},
    domain::requests::{
        CreateProductRequest, FindAllProducts, FormFields, ImageUpload, ProductFormSchema,
        UpdateProductRequest,
    },
    middleware::jwt::{auth_middleware, super_admin_middleware},
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Multipart, Path, Query},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use shared::{
    domain::responses::{MessageResponse, ProductListResponse, ProductResponse},
    errors::{ErrorResponse, HttpError},
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

const IMAGES_FIELD: &str = "images";

fn parse_product_id(raw: &str) -> Result<Uuid, HttpError> {
    Uuid::parse_str(raw).map_err(|_| HttpError::BadRequest(format!("Invalid product id '{raw}'")))
}

/// Splits a product form into its text fields and the uploaded images.
/// Empty file parts are skipped.
async fn read_product_form(
    mut multipart: Multipart,
) -> Result<(FormFields, Vec<ImageUpload>), HttpError> {
    let mut fields = FormFields::new();
    let mut images = Vec::new();

    let invalid = |e: axum::extract::multipart::MultipartError| {
        HttpError::BadRequest(format!("Invalid multipart body: {e}"))
    };

    while let Some(field) = multipart.next_field().await.map_err(invalid)? {
        let name = field.name().unwrap_or_default().to_string();

        if name == IMAGES_FIELD {
            let file_name = field.file_name().unwrap_or("image").to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await.map_err(invalid)?;

            if !bytes.is_empty() {
                images.push(ImageUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
        } else {
            let value = field.text().await.map_err(invalid)?;
            fields.insert(name, value);
        }
    }

    Ok((fields, images))
}

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Product",
    security(("bearer_auth" = [])),
    params(FindAllProducts),
    responses(
        (status = 200, description = "One page of products", body = ProductListResponse),
        (status = 400, description = "Unsupported sort field or order", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_products(
    Extension(service): Extension<DynProductQueryService>,
    Query(params): Query<FindAllProducts>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_for_client(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/products/admin",
    tag = "Product",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Every product, newest first", body = Vec<ProductResponse>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Super admin only", body = ErrorResponse)
    )
)]
pub async fn get_admin_products(
    Extension(service): Extension<DynProductQueryService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all_for_admin().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Product",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product details", body = ProductResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn get_product(
    Extension(service): Extension<DynProductQueryService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let id = parse_product_id(&id)?;
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Product",
    security(("bearer_auth" = [])),
    request_body(content = ProductFormSchema, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Super admin only", body = ErrorResponse),
        (status = 500, description = "Upload or insert failed", body = ErrorResponse)
    )
)]
pub async fn create_product(
    Extension(service): Extension<DynProductCommandService>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpError> {
    let (fields, images) = read_product_form(multipart).await?;
    let req = CreateProductRequest::from_form(&fields)?;

    let response = service.create_product(&req, images).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Product",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body(content = ProductFormSchema, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn update_product(
    Extension(service): Extension<DynProductCommandService>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpError> {
    let id = parse_product_id(&id)?;
    let (fields, _) = read_product_form(multipart).await?;
    let req = UpdateProductRequest::from_form(id, &fields)?;

    let response = service.update_product(&req).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Product",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn delete_product(
    Extension(service): Extension<DynProductCommandService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let id = parse_product_id(&id)?;
    let response = service.delete_product(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn product_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let service = &app_state.di_container.product_service;

    let customer = OpenApiRouter::new()
        .route("/api/products", get(get_products))
        .route("/api/products/{id}", get(get_product))
        .route_layer(middleware::from_fn(auth_middleware));

    let admin = OpenApiRouter::new()
        .route("/api/products", post(create_product))
        .route("/api/products/admin", get(get_admin_products))
        .route("/api/products/{id}", put(update_product).delete(delete_product))
        .route_layer(middleware::from_fn(super_admin_middleware))
        .route_layer(middleware::from_fn(auth_middleware));

    customer
        .merge(admin)
        .layer(Extension(service.query.clone()))
        .layer(Extension(service.command.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
