/// Bearer token middleware for Axum
///
/// Reads `Authorization: Bearer <token>`, verifies it with a
/// [`TokenIssuer`] and inserts the resulting [`UserToken`] into the request
/// extensions. Handlers take it with `Extension<UserToken>`.
///
/// Rejections are written in the API's `{message, data}` envelope.
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::get, Extension, Router};
/// use chrono::Duration;
/// use eventdesk_shared::auth::jwt::{TokenIssuer, UserToken};
/// use eventdesk_shared::auth::middleware::create_jwt_middleware;
///
/// async fn me(Extension(user): Extension<UserToken>) -> String {
///     user.id.to_string()
/// }
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let issuer = TokenIssuer::new("secret", Duration::hours(1))?;
/// let app: Router = Router::new()
///     .route("/me", get(me))
///     .layer(middleware::from_fn(create_jwt_middleware(issuer)));
/// # Ok(())
/// # }
/// ```

use std::future::Future;
use std::pin::Pin;

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use super::jwt::{JwtError, TokenIssuer};

/// Why a request was turned away before reaching its handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRejection {
    /// No `Authorization` header
    MissingCredentials,

    /// Header present but not `Bearer <token>`
    InvalidFormat,

    /// Token failed verification
    InvalidToken(String),

    /// Authenticated, but the role isn't allowed here
    Forbidden,
}

impl AuthRejection {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthRejection::Forbidden => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AuthRejection::MissingCredentials => "unauthorized".to_string(),
            AuthRejection::InvalidFormat => "expected a bearer token".to_string(),
            AuthRejection::InvalidToken(msg) => msg.clone(),
            AuthRejection::Forbidden => "forbidden".to_string(),
        }
    }
}

impl From<JwtError> for AuthRejection {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => AuthRejection::InvalidToken("token has expired".to_string()),
            _ => AuthRejection::InvalidToken("invalid token".to_string()),
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = json!({ "message": self.message(), "data": null });
        (self.status(), Json(body)).into_response()
    }
}

/// Extracts the token from an `Authorization` header value
pub fn bearer_token(value: &str) -> Option<&str> {
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Verifies the bearer token and attaches its [`UserToken`]
pub async fn jwt_auth_middleware(
    issuer: TokenIssuer,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthRejection> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthRejection::MissingCredentials)?;

    let token = bearer_token(header).ok_or(AuthRejection::InvalidFormat)?;

    let user = issuer.verify(token).map_err(|e| {
        tracing::debug!(error = %e, "Rejected bearer token");
        AuthRejection::from(e)
    })?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

type MiddlewareFuture = Pin<Box<dyn Future<Output = Result<Response, AuthRejection>> + Send>>;

/// Captures an issuer and returns a closure for `middleware::from_fn`
pub fn create_jwt_middleware(
    issuer: TokenIssuer,
) -> impl Fn(Request, Next) -> MiddlewareFuture + Clone {
    move |req, next| {
        let issuer = issuer.clone();
        Box::pin(jwt_auth_middleware(issuer, req, next))
    }
}
