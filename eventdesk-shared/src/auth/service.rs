/// Register, login, activation and profile lookup
///
/// [`AuthService`] composes the schema validator, the credential hasher and
/// the token issuer around a [`UserStore`]. It holds no mutable state of its
/// own; every collaborator is shared and configured once at startup.
///
/// # Flow
///
/// - **register**: validate → hash password → store → mail activation code
/// - **login**: validate → look up by email or username → active gate →
///   compare digests → issue token
/// - **activate**: validate → flip the inactive record holding the code
/// - **me**: fetch the record named by a verified token
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use chrono::Duration;
/// use eventdesk_shared::auth::jwt::TokenIssuer;
/// use eventdesk_shared::auth::password::{CredentialHasher, HashParams};
/// use eventdesk_shared::auth::service::{AuthOptions, AuthService};
/// use eventdesk_shared::mail::LogMailer;
/// use eventdesk_shared::store::memory::MemoryUserStore;
/// use serde_json::json;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let service = AuthService::new(
///     Arc::new(MemoryUserStore::new()),
///     CredentialHasher::new("hash-secret", HashParams::default())?,
///     TokenIssuer::new("jwt-secret", Duration::hours(1))?,
///     Arc::new(LogMailer),
///     AuthOptions::default(),
/// );
///
/// let user = service.register(&json!({
///     "fullName": "Alice Liddell",
///     "username": "alice",
///     "email": "alice@example.com",
///     "password": "Abc123",
///     "confirmPassword": "Abc123",
/// })).await?;
/// # Ok(())
/// # }
/// ```

use std::sync::Arc;

use rand::RngCore;
use serde::Deserialize;
use serde_json::{json, Value};

use super::jwt::{JwtError, TokenIssuer, UserToken};
use super::password::{CredentialHasher, PasswordError};
use crate::mail::{self, MailMessage, Mailer};
use crate::models::user::{CreateUser, User};
use crate::store::{StoreError, UserStore};
use crate::validation::{schemas, ValidationError};

/// Error type for auth operations
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Payload rejected by a schema
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Email or username already registered
    #[error("{0} already exists")]
    Duplicate(String),

    /// No matching user record
    #[error("{0}")]
    NotFound(String),

    /// The user hasn't redeemed their activation code
    #[error("user is not activated yet")]
    Inactive,

    /// Password doesn't match the stored digest
    #[error("invalid credentials")]
    Unauthorized,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] JwtError),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(field) => AuthError::Duplicate(field),
            other => AuthError::Store(other),
        }
    }
}

/// Behaviour switches and mail settings
#[derive(Debug, Clone)]
pub struct AuthOptions {
    /// Refuse login until the user's own record is active
    pub require_active: bool,

    /// Sender address of activation mail
    pub mail_from: String,

    /// Base URL of the client app; activation links point at
    /// `{client_host}/auth/activation?code=...`
    pub client_host: String,
}

impl Default for AuthOptions {
    fn default() -> Self {
        Self {
            require_active: true,
            mail_from: "no-reply@eventdesk.local".to_string(),
            client_host: "http://localhost:3001".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest {
    full_name: String,
    username: String,
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    identifier: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct ActivationRequest {
    code: String,
}

/// Authentication pipeline
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    hasher: CredentialHasher,
    issuer: TokenIssuer,
    mailer: Arc<dyn Mailer>,
    options: AuthOptions,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn UserStore>,
        hasher: CredentialHasher,
        issuer: TokenIssuer,
        mailer: Arc<dyn Mailer>,
        options: AuthOptions,
    ) -> Self {
        Self {
            store,
            hasher,
            issuer,
            mailer,
            options,
        }
    }

    /// Token issuer used for login, also needed to verify bearer tokens
    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    /// Registers a new, inactive user and mails their activation code
    ///
    /// A mail failure is logged and does not fail the registration.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Validation`] if the payload breaks the register schema
    /// - [`AuthError::Duplicate`] if the email or username is taken
    pub async fn register(&self, payload: &Value) -> Result<User, AuthError> {
        let req: RegisterRequest = schemas::REGISTER.parse(payload)?;

        let password = self.hash(req.password).await?;

        let user = self
            .store
            .create(CreateUser {
                full_name: req.full_name,
                username: req.username,
                email: req.email,
                password,
                activation_code: generate_activation_code(),
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        if let Err(e) = self.send_activation_mail(&user).await {
            tracing::warn!(user_id = %user.id, error = %e, "Failed to send activation mail");
        }

        Ok(user)
    }

    /// Authenticates by email or username and returns a signed token
    ///
    /// # Errors
    ///
    /// - [`AuthError::NotFound`] if no user has the identifier
    /// - [`AuthError::Inactive`] if that user isn't active and the gate is on
    /// - [`AuthError::Unauthorized`] if the password doesn't match
    pub async fn login(&self, payload: &Value) -> Result<String, AuthError> {
        let req: LoginRequest = schemas::LOGIN.parse(payload)?;

        let user = self
            .store
            .find_by_identifier(&req.identifier)
            .await?
            .ok_or_else(|| AuthError::NotFound("user not found".to_string()))?;

        if self.options.require_active && !user.is_active {
            return Err(AuthError::Inactive);
        }

        if !self.verify(req.password, user.password.clone()).await? {
            tracing::debug!(user_id = %user.id, "Password mismatch");
            return Err(AuthError::Unauthorized);
        }

        let token = self.issuer.issue(&UserToken {
            id: user.id,
            role: user.role,
        })?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(token)
    }

    /// Returns the record of the user named by a verified token
    pub async fn me(&self, token: &UserToken) -> Result<User, AuthError> {
        self.store
            .find_by_id(token.id)
            .await?
            .ok_or_else(|| AuthError::NotFound("user not found".to_string()))
    }

    /// Redeems an activation code
    ///
    /// Each code works once: redeeming it again fails with
    /// [`AuthError::NotFound`], as does an unknown code.
    pub async fn activate(&self, payload: &Value) -> Result<User, AuthError> {
        let req: ActivationRequest = schemas::ACTIVATION.parse(payload)?;

        let user = self
            .store
            .activate(&req.code)
            .await?
            .ok_or_else(|| AuthError::NotFound("activation code not found".to_string()))?;

        tracing::info!(user_id = %user.id, "User activated");
        Ok(user)
    }

    async fn send_activation_mail(&self, user: &User) -> Result<(), mail::MailError> {
        let link = format!(
            "{}/auth/activation?code={}",
            self.options.client_host.trim_end_matches('/'),
            user.activation_code
        );

        let html = mail::render(
            "registration-success.html",
            &json!({
                "fullName": user.full_name,
                "username": user.username,
                "activationLink": link,
            }),
        )?;

        self.mailer
            .send(&MailMessage {
                from: self.options.mail_from.clone(),
                to: user.email.clone(),
                subject: "Activate your EventDesk account".to_string(),
                html,
            })
            .await
    }

    // Argon2 is memory-hard; keep it off the async workers.
    async fn hash(&self, plaintext: String) -> Result<String, PasswordError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| PasswordError::HashError(e.to_string()))?
    }

    async fn verify(&self, plaintext: String, digest: String) -> Result<bool, PasswordError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &digest))
            .await
            .map_err(|e| PasswordError::HashError(e.to_string()))?
    }
}

fn generate_activation_code() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
