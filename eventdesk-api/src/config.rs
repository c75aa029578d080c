/// Configuration management for the API server
///
/// Loaded once at startup from environment variables (and `.env`, if
/// present) into an immutable [`Config`] shared through application state.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 3000)
/// - `CORS_ORIGINS`: Comma-separated allowed origins, `*` for any (default: *)
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `JWT_SECRET`: Token signing key, at least 32 characters (required)
/// - `JWT_EXPIRES_IN_SECONDS`: Token lifetime, at most one year (default: 3600)
/// - `HASH_SECRET`: Password hashing secret (required)
/// - `REQUIRE_ACTIVE_USER`: Refuse login until activated (default: true)
/// - `MAIL_FROM`: Sender of activation mail
/// - `MAIL_RELAY_URL`: HTTP mail relay endpoint; unset logs mail instead
/// - `MAIL_RELAY_TOKEN`: Bearer token for the relay
/// - `CLIENT_HOST`: Base URL of the client app used in activation links
///
/// # Example
///
/// ```no_run
/// use eventdesk_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use std::env;

use anyhow::Context;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub hash: HashConfig,
    pub auth: AuthConfig,
    pub mail: MailConfig,
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,

    /// Allowed CORS origins; `*` allows any
    pub cors_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for JWT signing
    ///
    /// Generate with: `openssl rand -hex 32`
    pub secret: String,

    /// Token lifetime in seconds
    pub expires_in_seconds: i64,
}

/// Password hashing configuration
#[derive(Debug, Clone)]
pub struct HashConfig {
    pub secret: String,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Refuse login for users who haven't activated
    pub require_active: bool,
}

/// Outgoing mail configuration
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub from: String,
    pub relay_url: Option<String>,
    pub relay_token: Option<String>,
    pub client_host: String,
}

/// Longest accepted token lifetime (one year)
pub const MAX_TOKEN_LIFETIME_SECONDS: i64 = 365 * 24 * 60 * 60;

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value doesn't
    /// parse.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            var(key).ok_or_else(|| anyhow::anyhow!("{} environment variable is required", key))
        };

        let port = var("API_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .context("API_PORT must be a port number")?;

        let cors_origins = var("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        let max_connections = var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "10".to_string())
            .parse::<u32>()
            .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?;

        let jwt_secret = required("JWT_SECRET")?;
        if jwt_secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters long");
        }

        let expires_in_seconds = var("JWT_EXPIRES_IN_SECONDS")
            .unwrap_or_else(|| "3600".to_string())
            .parse::<i64>()
            .context("JWT_EXPIRES_IN_SECONDS must be an integer")?;
        if !(1..=MAX_TOKEN_LIFETIME_SECONDS).contains(&expires_in_seconds) {
            anyhow::bail!(
                "JWT_EXPIRES_IN_SECONDS must be between 1 and {}",
                MAX_TOKEN_LIFETIME_SECONDS
            );
        }

        let require_active = match var("REQUIRE_ACTIVE_USER").as_deref() {
            None => true,
            Some("true") | Some("1") => true,
            Some("false") | Some("0") => false,
            Some(other) => anyhow::bail!("REQUIRE_ACTIVE_USER must be true or false, got {}", other),
        };

        Ok(Self {
            api: ApiConfig {
                host: var("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port,
                cors_origins,
            },
            database: DatabaseConfig {
                url: required("DATABASE_URL")?,
                max_connections,
            },
            jwt: JwtConfig {
                secret: jwt_secret,
                expires_in_seconds,
            },
            hash: HashConfig {
                secret: required("HASH_SECRET")?,
            },
            auth: AuthConfig { require_active },
            mail: MailConfig {
                from: var("MAIL_FROM").unwrap_or_else(|| "no-reply@eventdesk.local".to_string()),
                relay_url: var("MAIL_RELAY_URL"),
                relay_token: var("MAIL_RELAY_TOKEN"),
                client_host: var("CLIENT_HOST")
                    .unwrap_or_else(|| "http://localhost:3001".to_string()),
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    const REQUIRED: &[(&str, &str)] = &[
        ("DATABASE_URL", "postgres://localhost/eventdesk"),
        ("JWT_SECRET", "test-secret-key-at-least-32-bytes-long"),
        ("HASH_SECRET", "hash-secret"),
    ];

    #[test]
    fn test_defaults() {
        let config = load(REQUIRED).unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.api.cors_origins, vec!["*".to_string()]);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.jwt.expires_in_seconds, 3600);
        assert!(config.auth.require_active);
        assert!(config.mail.relay_url.is_none());
    }

    #[test]
    fn test_overrides() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("API_HOST", "127.0.0.1"),
            ("API_PORT", "8080"),
            ("CORS_ORIGINS", "https://a.example, https://b.example"),
            ("REQUIRE_ACTIVE_USER", "false"),
            ("MAIL_RELAY_URL", "http://relay.local/send"),
        ]);

        let config = load(&vars).unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(
            config.api.cors_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert!(!config.auth.require_active);
        assert_eq!(config.mail.relay_url.as_deref(), Some("http://relay.local/send"));
    }

    #[test]
    fn test_missing_secrets_abort() {
        for missing in ["DATABASE_URL", "JWT_SECRET", "HASH_SECRET"] {
            let vars: Vec<_> = REQUIRED
                .iter()
                .copied()
                .filter(|(k, _)| *k != missing)
                .collect();

            let err = load(&vars).unwrap_err();
            assert!(err.to_string().contains(missing));
        }
    }

    #[test]
    fn test_short_jwt_secret_rejected() {
        let mut vars = REQUIRED.to_vec();
        vars.retain(|(k, _)| *k != "JWT_SECRET");
        vars.push(("JWT_SECRET", "short"));

        assert!(load(&vars).is_err());
    }

    #[test]
    fn test_token_lifetime_bounds() {
        for value in ["0", "-5", "31536001", "9223372036854775807"] {
            let mut vars = REQUIRED.to_vec();
            vars.push(("JWT_EXPIRES_IN_SECONDS", value));

            let err = load(&vars).unwrap_err();
            assert!(
                err.to_string().contains("JWT_EXPIRES_IN_SECONDS"),
                "{} should be rejected",
                value
            );
        }

        let mut vars = REQUIRED.to_vec();
        vars.push(("JWT_EXPIRES_IN_SECONDS", "31536000"));
        assert_eq!(
            load(&vars).unwrap().jwt.expires_in_seconds,
            MAX_TOKEN_LIFETIME_SECONDS
        );
    }

    #[test]
    fn test_invalid_port_rejected() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("API_PORT", "not-a-port"));

        assert!(load(&vars).is_err());
    }
}
