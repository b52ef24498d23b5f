use crate::{
    abstract_trait::coupon::DynCouponService,
    domain::requests::CreateCouponRequest,
    middleware::{
        jwt::{auth_middleware, super_admin_middleware},
        validate::SimpleValidatedJson,
    },
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get},
};
use shared::{
    domain::responses::{CouponCreatedResponse, CouponListResponse, MessageResponse},
    errors::{ErrorResponse, HttpError},
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/coupon",
    tag = "Coupon",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Every coupon, newest first", body = CouponListResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Super admin only", body = ErrorResponse)
    )
)]
pub async fn get_coupons(
    Extension(service): Extension<DynCouponService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/coupon",
    tag = "Coupon",
    security(("bearer_auth" = [])),
    request_body = CreateCouponRequest,
    responses(
        (status = 201, description = "Coupon created", body = CouponCreatedResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Code already in use", body = ErrorResponse)
    )
)]
pub async fn create_coupon(
    Extension(service): Extension<DynCouponService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateCouponRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_coupon(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/coupon/{id}",
    tag = "Coupon",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Coupon ID")),
    responses(
        (status = 200, description = "Coupon deleted", body = MessageResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Coupon not found", body = ErrorResponse)
    )
)]
pub async fn delete_coupon(
    Extension(service): Extension<DynCouponService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let id = Uuid::parse_str(&id)
        .map_err(|_| HttpError::BadRequest(format!("Invalid coupon id '{id}'")))?;

    let response = service.delete_coupon(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn coupon_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/coupon", get(get_coupons).post(create_coupon))
        .route("/api/coupon/{id}", delete(delete_coupon))
        .route_layer(middleware::from_fn(super_admin_middleware))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.coupon_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
