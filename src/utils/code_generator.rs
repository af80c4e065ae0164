//! Short code generation.
//!
//! Codes are six characters drawn from the URL-safe base64 alphabet
//! (`A-Z`, `a-z`, `0-9`, `-`, `_`), sampled from a cryptographically
//! secure generator.

use base64::Engine as _;
use rand::RngCore;

/// Number of characters in a generated short code.
pub const CODE_LENGTH: usize = 6;

/// Random bytes encoded per code. Six bytes encode to eight base64
/// characters; the first six carry 36 uniformly random bits.
const CODE_LENGTH_BYTES: usize = 6;

/// Codes that would be shadowed by fixed routes.
const RESERVED_CODES: &[&str] = &["health"];

/// Generates a random short code.
///
/// Uses the thread-local CSPRNG (ChaCha, seeded from the OS) and encodes the
/// result as URL-safe base64 without padding.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 6);
/// assert!(is_valid_code(&code));
/// ```
pub fn generate_code() -> String {
    loop {
        let mut buffer = [0u8; CODE_LENGTH_BYTES];
        rand::rng().fill_bytes(&mut buffer);

        let mut code = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer);
        code.truncate(CODE_LENGTH);

        if !RESERVED_CODES.contains(&code.as_str()) {
            return code;
        }
    }
}

/// Returns true if `code` has the shape of a generated code.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
