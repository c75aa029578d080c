/// JWT token issuance and verification
///
/// Tokens are signed using HS256 (HMAC-SHA256) and carry the minimal identity
/// needed by the API: the user ID and role. Expiry is fixed at issuance and
/// checked with zero leeway.
///
/// # Example
///
/// ```
/// use eventdesk_shared::auth::jwt::{TokenIssuer, UserToken};
/// use eventdesk_shared::models::user::Role;
/// use chrono::Duration;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let issuer = TokenIssuer::new("your-secret-key", Duration::hours(1))?;
///
/// let subject = UserToken { id: Uuid::new_v4(), role: Role::User };
/// let token = issuer.issue(&subject)?;
///
/// assert_eq!(issuer.verify(&token)?, subject);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::Role;

/// Issuer claim stamped on every token
pub const ISSUER: &str = "eventdesk";

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Signing key missing at startup
    #[error("Token signing key is not configured")]
    MissingSecret,

    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Signature, issuer or format check failed
    #[error("Invalid token: {0}")]
    Invalid(String),
}

/// Identity carried by a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserToken {
    /// User ID
    pub id: Uuid,

    /// User role
    pub role: Role,
}

/// JWT claims structure
///
/// # Standard Claims
///
/// - `sub`: Subject (user ID)
/// - `iss`: Issuer (always "eventdesk")
/// - `iat`: Issued at timestamp
/// - `nbf`: Not before timestamp
/// - `exp`: Expiration timestamp
///
/// # Custom Claims
///
/// - `role`: User role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - User ID
    pub sub: Uuid,

    /// User role (custom claim)
    pub role: Role,

    /// Issuer - Always "eventdesk"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates claims for `subject` expiring `expires_in` from now
    pub fn new(subject: &UserToken, expires_in: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: subject.id,
            role: subject.role,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: (now + expires_in).timestamp(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Identity carried by these claims
    pub fn user(&self) -> UserToken {
        UserToken {
            id: self.sub,
            role: self.role,
        }
    }
}

/// Signs and verifies identity tokens with a process-wide key
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expires_in: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("expires_in", &self.expires_in)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Creates an issuer from the signing secret
    ///
    /// # Errors
    ///
    /// Returns `JwtError::MissingSecret` if `secret` is empty.
    pub fn new(secret: &str, expires_in: Duration) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::MissingSecret);
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expires_in,
        })
    }

    /// Issues a token for `subject` with the configured lifetime
    pub fn issue(&self, subject: &UserToken) -> Result<String, JwtError> {
        self.sign(&Claims::new(subject, self.expires_in))
    }

    /// Signs an explicit claim set
    pub fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
    }

    /// Verifies a token and returns the identity it carries
    ///
    /// Verifies:
    /// - Signature is valid
    /// - Token hasn't expired
    /// - Issuer is "eventdesk"
    /// - Token is not used before nbf time
    pub fn verify(&self, token: &str) -> Result<UserToken, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Invalid(e.to_string()),
            }
        })?;

        Ok(token_data.claims.user())
    }
}
