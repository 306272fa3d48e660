use axum::extract::{FromRequest, FromRequestParts};

use crate::error::WebError;

/// JSON body extractor whose rejections are rendered as `WebError`
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(WebError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor whose rejections are rendered as `WebError`
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(WebError))]
pub struct ApiQuery<T>(pub T);

/// Path parameter extractor whose rejections are rendered as `WebError`
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(WebError))]
pub struct ApiPath<T>(pub T);
