/// Email verification token generation
///
/// Tokens are opaque single-use strings: 10 bytes of cryptographically secure
/// randomness, hex-encoded to 20 characters. They carry no embedded data;
/// validity is decided solely by a store lookup plus a timestamp comparison
/// against the 15-minute window.

use rand::rngs::OsRng;
use rand::RngCore;

/// Number of random bytes per token (20 hex characters)
pub const TOKEN_BYTES: usize = 10;

/// Issues a fresh verification token
///
/// Collision probability within the 15-minute validity window is negligible
/// (80 bits of randomness).
///
/// # Example
///
/// ```
/// use tickdone_shared::auth::token::issue_token;
///
/// let token = issue_token();
/// assert_eq!(token.len(), 20);
/// ```
pub fn issue_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
