/// Role-based access checks
///
/// Runs after [`super::middleware::jwt_auth_middleware`] and reads the
/// [`UserToken`] it attached. A request without one never passed
/// authentication and is answered with 401; a token whose role isn't in the
/// allowed set gets 403.
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::post, Router};
/// use chrono::Duration;
/// use eventdesk_shared::auth::authorization::create_role_middleware;
/// use eventdesk_shared::auth::jwt::TokenIssuer;
/// use eventdesk_shared::auth::middleware::create_jwt_middleware;
/// use eventdesk_shared::models::user::Role;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let issuer = TokenIssuer::new("secret", Duration::hours(1))?;
/// let admin: Router = Router::new()
///     .route("/category", post(|| async { "created" }))
///     .layer(middleware::from_fn(create_role_middleware(&[Role::Admin])))
///     .layer(middleware::from_fn(create_jwt_middleware(issuer)));
/// # Ok(())
/// # }
/// ```

use std::future::Future;
use std::pin::Pin;

use axum::{extract::Request, middleware::Next, response::Response};

use super::jwt::UserToken;
use super::middleware::AuthRejection;
use crate::models::user::Role;

/// Error type for authorization checks
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuthzError {
    /// The token's role isn't allowed
    #[error("role {actual:?} is not allowed, requires one of {allowed:?}")]
    RoleNotAllowed { allowed: Vec<Role>, actual: Role },
}

/// Checks that `user` holds one of `allowed`
pub fn require_role(user: &UserToken, allowed: &[Role]) -> Result<(), AuthzError> {
    if allowed.contains(&user.role) {
        Ok(())
    } else {
        Err(AuthzError::RoleNotAllowed {
            allowed: allowed.to_vec(),
            actual: user.role,
        })
    }
}

/// Lets the request through only if its token's role is in `allowed`
pub async fn role_middleware(
    allowed: Vec<Role>,
    req: Request,
    next: Next,
) -> Result<Response, AuthRejection> {
    let user = req
        .extensions()
        .get::<UserToken>()
        .copied()
        .ok_or(AuthRejection::MissingCredentials)?;

    require_role(&user, &allowed).map_err(|e| {
        tracing::debug!(user_id = %user.id, error = %e, "Role check failed");
        AuthRejection::Forbidden
    })?;

    Ok(next.run(req).await)
}

type MiddlewareFuture = Pin<Box<dyn Future<Output = Result<Response, AuthRejection>> + Send>>;

/// Captures the allowed roles and returns a closure for `middleware::from_fn`
pub fn create_role_middleware(
    allowed: &[Role],
) -> impl Fn(Request, Next) -> MiddlewareFuture + Clone {
    let allowed = allowed.to_vec();
    move |req, next| {
        let allowed = allowed.clone();
        Box::pin(role_middleware(allowed, req, next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn token(role: Role) -> UserToken {
        UserToken {
            id: Uuid::new_v4(),
            role,
        }
    }

    #[test]
    fn test_require_role_allows_listed_roles() {
        assert!(require_role(&token(Role::Admin), &[Role::Admin]).is_ok());
        assert!(require_role(&token(Role::User), &[Role::Admin, Role::User]).is_ok());
    }

    #[test]
    fn test_require_role_rejects_others() {
        let err = require_role(&token(Role::User), &[Role::Admin]).unwrap_err();
        assert_eq!(
            err,
            AuthzError::RoleNotAllowed {
                allowed: vec![Role::Admin],
                actual: Role::User,
            }
        );
    }

    #[test]
    fn test_empty_allow_list_rejects_everyone() {
        assert!(require_role(&token(Role::Admin), &[]).is_err());
    }
}
