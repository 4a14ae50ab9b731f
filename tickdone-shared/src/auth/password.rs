/// Password hashing with bcrypt and a process-wide pepper
///
/// Every password is concatenated with a server-held secret (the "pepper")
/// before hashing, so a leaked database cannot be attacked without also
/// obtaining the pepper. The pepper is distinct from the per-hash salt that
/// bcrypt generates internally.
///
/// # Security
///
/// - **Algorithm**: bcrypt, cost factor 10
/// - **Salt**: random per hash, embedded in the output string
/// - **Pepper**: required non-empty; hashing refuses to run without it
///
/// # Example
///
/// ```
/// use tickdone_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("super_secret_password", "pepper")?;
///
/// assert!(verify_password("super_secret_password", "pepper", &hash)?);
/// assert!(!verify_password("wrong_password", "pepper", &hash)?);
/// # Ok(())
/// # }
/// ```

/// bcrypt cost factor (2^10 rounds)
pub const BCRYPT_COST: u32 = 10;

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// The process pepper secret is empty or absent
    ///
    /// Hashing with an empty pepper would silently produce hashes that are
    /// portable across deployments, so this is treated as a fatal
    /// configuration error rather than a default.
    #[error("Pepper secret is missing; refusing to hash without it")]
    MissingPepper,

    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password (malformed stored hash)
    #[error("Failed to verify password: {0}")]
    VerifyError(String),
}

/// Hashes a password concatenated with the pepper using bcrypt
///
/// Two calls with identical input produce different hashes (random salt);
/// both verify against the same password + pepper.
///
/// # Errors
///
/// - `PasswordError::MissingPepper` if `pepper` is empty, checked before any
///   hashing occurs
/// - `PasswordError::HashError` if bcrypt fails
///
/// # Example
///
/// ```
/// use tickdone_shared::auth::password::hash_password;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("my_password", "pepper")?;
/// assert!(hash.starts_with("$2"));
/// # Ok(())
/// # }
/// ```
pub fn hash_password(password: &str, pepper: &str) -> Result<String, PasswordError> {
    if pepper.is_empty() {
        return Err(PasswordError::MissingPepper);
    }

    let peppered = format!("{}{}", password, pepper);

    bcrypt::hash(peppered, BCRYPT_COST)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))
}

/// Verifies a password + pepper against a stored bcrypt hash
///
/// Returns `Ok(false)` on mismatch. The two failure causes a caller may see
/// (no such user vs wrong password) must stay indistinguishable in responses;
/// this function only reports whether the credential matched.
///
/// # Errors
///
/// - `PasswordError::MissingPepper` if `pepper` is empty
/// - `PasswordError::VerifyError` if the stored hash is malformed
///
/// # Example
///
/// ```
/// use tickdone_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("correct_password", "pepper")?;
///
/// assert!(verify_password("correct_password", "pepper", &hash)?);
/// assert!(!verify_password("wrong_password", "pepper", &hash)?);
/// # Ok(())
/// # }
/// ```
pub fn verify_password(password: &str, pepper: &str, hash: &str) -> Result<bool, PasswordError> {
    if pepper.is_empty() {
        return Err(PasswordError::MissingPepper);
    }

    let peppered = format!("{}{}", password, pepper);

    bcrypt::verify(peppered, hash)
        .map_err(|e| PasswordError::VerifyError(format!("Verification failed: {}", e)))
}
