/// Credential hashing using Argon2id with a configured salt
///
/// Digests are deterministic for a fixed hashing secret: the salt is derived
/// from the configured secret (SHA-256, then base64), so `hash(x) == hash(x)`
/// and login compares digest to digest.
///
/// # Security
///
/// - **Algorithm**: Argon2id, version 0x13
/// - **Memory**: 64 MB (65536 KB) by default
/// - **Iterations**: 3 passes by default
/// - **Parallelism**: 4 lanes by default
/// - **Output**: 32-byte hash, PHC string encoded
///
/// # Example
///
/// ```
/// use eventdesk_shared::auth::password::{CredentialHasher, HashParams};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hasher = CredentialHasher::new("hash-secret", HashParams::default())?;
///
/// let digest = hasher.hash("Abc123")?;
/// assert_eq!(digest, hasher.hash("Abc123")?);
/// assert!(hasher.verify("Abc123", &digest)?);
/// assert!(!hasher.verify("wrong", &digest)?);
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Algorithm, Argon2, Params, Version,
};
use sha2::{Digest, Sha256};

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// The hashing secret is missing or the parameters are unusable
    #[error("Hasher configuration error: {0}")]
    Configuration(String),

    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),
}

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    /// Memory cost in KiB
    pub memory_kib: u32,

    /// Number of passes
    pub iterations: u32,

    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            memory_kib: 65536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

/// Deterministic one-way credential hasher
///
/// Built once at startup from process configuration and shared by reference.
#[derive(Clone)]
pub struct CredentialHasher {
    salt: SaltString,
    params: Params,
}

impl std::fmt::Debug for CredentialHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialHasher")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl CredentialHasher {
    /// Creates a hasher from the configured secret
    ///
    /// # Errors
    ///
    /// Returns `PasswordError::Configuration` if `secret` is empty or the
    /// cost parameters are rejected by Argon2.
    pub fn new(secret: &str, params: HashParams) -> Result<Self, PasswordError> {
        if secret.is_empty() {
            return Err(PasswordError::Configuration(
                "hashing secret is not set".to_string(),
            ));
        }

        let seed = Sha256::digest(secret.as_bytes());
        let salt = SaltString::encode_b64(&seed)
            .map_err(|e| PasswordError::Configuration(format!("Invalid salt: {}", e)))?;

        let params = Params::new(
            params.memory_kib,
            params.iterations,
            params.parallelism,
            Some(32),
        )
        .map_err(|e| PasswordError::Configuration(format!("Invalid parameters: {}", e)))?;

        Ok(Self { salt, params })
    }

    /// Hashes a plaintext secret into a PHC string digest
    ///
    /// Example output:
    /// ```text
    /// $argon2id$v=19$m=65536,t=3,p=4$<salt>$<hash>
    /// ```
    pub fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone());

        let digest = argon2
            .hash_password(plaintext.as_bytes(), &self.salt)
            .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

        Ok(digest.to_string())
    }

    /// Checks a plaintext secret against a stored digest
    ///
    /// Hashes `plaintext` with the configured salt and compares the two
    /// digests in constant time.
    pub fn verify(&self, plaintext: &str, digest: &str) -> Result<bool, PasswordError> {
        let candidate = self.hash(plaintext)?;
        Ok(constant_time_eq(candidate.as_bytes(), digest.as_bytes()))
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
