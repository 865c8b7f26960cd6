use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
    Extension, Json,
};
use serde::Serialize;

use service::auth::domain::{AuthClaims, AuthSession, LoginRequest, RegistrationRequest};
use service::auth::AuthService;

use crate::errors::ApiError;
use crate::extract::JsonBody;

pub const AUTHENTICATED_MESSAGE: &str = "Você esta autenticado.";

#[derive(Clone)]
pub struct ServerState {
    pub auth: AuthService,
}

/// Profile echoed back from the verified token claims.
#[derive(Debug, Serialize)]
pub struct AuthenticatedOutput {
    #[serde(rename = "mensagem")]
    pub message: &'static str,
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
}

#[utoipa::path(post, path = "/api/usuario/register", tag = "auth", request_body = crate::openapi::RegisterRequest, responses((status = 200, description = "Registered", body = crate::openapi::AuthSessionDoc), (status = 400, description = "Validation failed", body = crate::openapi::ErrorBodyDoc)))]
pub async fn register(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<RegistrationRequest>,
) -> Result<Json<AuthSession>, ApiError> {
    let session = state.auth.register(input).await?;
    Ok(Json(session))
}

#[utoipa::path(post, path = "/api/usuario/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged in", body = crate::openapi::AuthSessionDoc), (status = 401, description = "Invalid credentials", body = crate::openapi::ErrorBodyDoc)))]
pub async fn login(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<LoginRequest>,
) -> Result<Json<AuthSession>, ApiError> {
    let session = state.auth.login(input).await?;
    Ok(Json(session))
}

#[utoipa::path(get, path = "/api/conectado/autenticado", tag = "auth", responses((status = 200, description = "Token accepted", body = crate::openapi::AuthenticatedDoc), (status = 401, description = "Missing, invalid or expired token", body = crate::openapi::ErrorBodyDoc)))]
pub async fn me(Extension(claims): Extension<AuthClaims>) -> Json<AuthenticatedOutput> {
    Json(AuthenticatedOutput {
        message: AUTHENTICATED_MESSAGE,
        id: claims.sub,
        name: claims.name,
        email: claims.email,
    })
}

// The scheme name is matched case-insensitively ("Bearer", "bearer", ...).
fn bearer_token(req: &Request) -> Option<&str> {
    let header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = header.trim_start().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token.trim()).filter(|t| !t.is_empty())
}

/// Require `Authorization: Bearer <token>`; verified claims are handed to the
/// handler through request extensions.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = req.uri().path().to_owned();
    let Some(token) = bearer_token(&req) else {
        tracing::warn!(%path, "missing bearer token");
        return Err(ApiError::MissingToken);
    };

    let claims = state.auth.verify_token(token).map_err(|e| {
        tracing::warn!(%path, "token validation failed");
        ApiError::from(e)
    })?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
