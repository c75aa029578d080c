/// Response envelopes and extractors
///
/// Successful responses are `{ "message", "data" }`; list endpoints add a
/// `pagination` object. The extractors wrap Axum's own so that malformed
/// bodies, paths and queries are answered in the same envelope via
/// [`ApiError`].

use axum::{
    extract::{FromRequest, FromRequestParts},
    Json,
};
use eventdesk_shared::pagination::Pagination;
use serde::Serialize;

use crate::error::ApiError;

/// `{ "message": ..., "data": ... }`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub message: String,
    pub data: T,
}

/// `{ "message": ..., "data": [...], "pagination": {...} }`
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub message: String,
    pub data: Vec<T>,
    pub pagination: Pagination,
}

pub fn success<T: Serialize>(message: &str, data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        message: message.to_string(),
        data,
    })
}

pub fn paginated<T: Serialize>(
    message: &str,
    data: Vec<T>,
    pagination: Pagination,
) -> Json<Paginated<T>> {
    Json(Paginated {
        message: message.to_string(),
        data,
        pagination,
    })
}

/// JSON body extractor rejecting with [`ApiError`]
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// Path extractor rejecting with [`ApiError`]
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct AppPath<T>(pub T);

/// Query extractor rejecting with [`ApiError`]
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct AppQuery<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;
    use eventdesk_shared::pagination::PageQuery;
    use serde_json::json;

    #[test]
    fn test_envelope_shape() {
        let Json(body) = success("ok", json!({ "id": 1 }));
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({ "message": "ok", "data": { "id": 1 } })
        );
    }

    #[test]
    fn test_paginated_shape() {
        let query = PageQuery {
            page: Some(2),
            limit: Some(1),
            search: None,
        };
        let Json(body) = paginated("ok", vec![1, 2], Pagination::new(3, &query));

        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({
                "message": "ok",
                "data": [1, 2],
                "pagination": { "total": 3, "totalPages": 3, "current": 2 }
            })
        );
    }
}
