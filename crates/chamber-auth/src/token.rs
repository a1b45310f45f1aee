use base64::Engine as _;
use chamber_core::identity::SessionToken;

use crate::error::AuthError;

const TOKEN_BYTES: usize = 32;

/// Mint a fresh session token: 32 random bytes, URL-safe base64 without
/// padding (43 chars), so it can go in a cookie unescaped.
///
/// # Errors
///
/// Returns `AuthError::TokenGeneration` if the OS random source fails.
pub fn generate_token() -> Result<SessionToken, AuthError> {
    let mut bytes = [0u8; TOKEN_BYTES];
    getrandom::fill(&mut bytes).map_err(|e| AuthError::TokenGeneration(e.to_string()))?;
    Ok(SessionToken::new(
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_cookie_safe_and_distinct() {
        let a = generate_token().unwrap();
        let b = generate_token().unwrap();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 43);
        assert!(
            a.as_str()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }
}
