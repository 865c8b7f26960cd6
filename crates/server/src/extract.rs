use axum::extract::FromRequest;

use crate::errors::ApiError;

/// `axum::Json` whose rejections (bad syntax, wrong field types, missing
/// content type) answer with the usual `{"errors": [..]}` body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
