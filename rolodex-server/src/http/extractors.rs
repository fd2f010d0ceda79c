//! Custom Axum extractors
//!
//! Rejections from the stock `Json` and `Query` extractors are plain
//! text; these wrappers report them in the API error shape instead.

use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// JSON body extractor whose rejection uses the API error shape.
///
/// Plain `Json` rejects with a text body and 415/422 statuses; clients
/// of this API expect `{message, error}` and a 400.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = axum::extract::rejection::JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest {
                message: rejection.body_text(),
            })?;

        Ok(Self(value))
    }
}

/// Query string extractor with the same rejection shape as [`ApiJson`].
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::BadRequest {
                message: rejection.body_text(),
            })?;

        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;
    use serde::Deserialize;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::models::PaginationParams;

    #[derive(Deserialize)]
    struct Strict {
        limit: u32,
    }

    fn app() -> Router {
        Router::new()
            .route(
                "/strict",
                get(|ApiQuery(q): ApiQuery<Strict>| async move { Json(json!({ "limit": q.limit })) }),
            )
            .route(
                "/page",
                get(|ApiQuery(params): ApiQuery<PaginationParams>| async move {
                    let page = params.pagination();
                    Json(json!({ "page": page.page, "per_page": page.per_page }))
                }),
            )
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn query_rejection_uses_error_shape() {
        let (status, body) = get_json("/strict?limit=lots").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn pagination_accepts_repeated_keys() {
        let (status, body) = get_json("/page?page=1&page=2&per_page=3x&extra=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "page": 1, "per_page": 3 }));
    }
}
