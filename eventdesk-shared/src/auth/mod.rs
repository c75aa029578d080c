/// Authentication and authorization
///
/// # Modules
///
/// - [`password`]: deterministic Argon2id credential hashing
/// - [`jwt`]: HS256 token issuance and verification
/// - [`service`]: register, login, activation and profile lookup
/// - [`middleware`]: bearer token middleware for Axum
/// - [`authorization`]: role gate
///
/// # Example
///
/// ```no_run
/// use chrono::Duration;
/// use eventdesk_shared::auth::jwt::{TokenIssuer, UserToken};
/// use eventdesk_shared::auth::password::{CredentialHasher, HashParams};
/// use eventdesk_shared::models::user::Role;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hasher = CredentialHasher::new("hash-secret", HashParams::default())?;
/// let digest = hasher.hash("Abc123")?;
/// assert!(hasher.verify("Abc123", &digest)?);
///
/// let issuer = TokenIssuer::new("jwt-secret", Duration::hours(1))?;
/// let token = issuer.issue(&UserToken { id: Uuid::new_v4(), role: Role::User })?;
/// # Ok(())
/// # }
/// ```

pub mod authorization;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod service;
