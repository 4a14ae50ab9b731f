/// Authentication primitives for tickdone
///
/// # Modules
///
/// - [`password`]: bcrypt password hashing with a process-wide pepper
/// - [`token`]: single-use email verification token generation
///
/// # Security Features
///
/// - **Password Hashing**: bcrypt with cost factor 10 and per-hash random salt
/// - **Pepper**: a server-held secret concatenated with every password before
///   hashing, so stored hashes are unusable outside this deployment
/// - **Verification Tokens**: 10 bytes of OS randomness, hex-encoded
///
/// # Example
///
/// ```
/// use tickdone_shared::auth::password::{hash_password, verify_password};
/// use tickdone_shared::auth::token::issue_token;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password", "server-pepper")?;
/// assert!(verify_password("user_password", "server-pepper", &hash)?);
///
/// let token = issue_token();
/// assert_eq!(token.len(), 20);
/// # Ok(())
/// # }
/// ```

pub mod password;
pub mod token;
