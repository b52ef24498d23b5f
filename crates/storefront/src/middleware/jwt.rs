use axum::{
    Extension,
    body::Body,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use shared::{abstract_trait::DynJwtService, config::Claims, errors::HttpError};
use tracing::warn;

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";

pub async fn auth_middleware(
    cookie_jar: CookieJar,
    Extension(jwt): Extension<DynJwtService>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, HttpError> {
    let token = cookie_jar
        .get(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .or_else(|| {
            req.headers()
                .get(header::AUTHORIZATION)
                .and_then(|auth_header| auth_header.to_str().ok())
                .and_then(|auth_value| auth_value.strip_prefix("Bearer ").map(str::to_owned))
        })
        .ok_or_else(|| HttpError::Unauthorized("Unauthenticated user".to_string()))?;

    let claims = jwt.verify_token(&token).map_err(|e| {
        warn!("🔒 Rejected access token: {e}");
        HttpError::Unauthorized("Invalid or expired token".to_string())
    })?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Must run after [`auth_middleware`].
pub async fn super_admin_middleware(req: Request<Body>, next: Next) -> Result<Response, HttpError> {
    let claims = req
        .extensions()
        .get::<Claims>()
        .ok_or_else(|| HttpError::Unauthorized("Unauthenticated user".to_string()))?;

    if !claims.is_super_admin() {
        warn!("⛔ User {} tried to reach an admin route", claims.user_id);
        return Err(HttpError::Forbidden(
            "Access denied! Super admin access required".to_string(),
        ));
    }

    Ok(next.run(req).await)
}
