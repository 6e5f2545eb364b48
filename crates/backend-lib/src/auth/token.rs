// ============================
// crates/backend-lib/src/auth/token.rs
// ============================
//! Session token minting and key naming.
use uuid::Uuid;

/// Namespace prefix for session entries in the token store
pub const SESSION_KEY_PREFIX: &str = "auth_";

/// Mint a new session token: 128 bits of randomness in canonical
/// hyphenated form. Tokens are never reused or recycled.
pub fn mint_token() -> String {
    Uuid::new_v4().to_string()
}

/// Token store key for a session token
pub fn session_key(token: &str) -> String {
    format!("{SESSION_KEY_PREFIX}{token}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_unique_and_canonical() {
        let token1 = mint_token();
        let token2 = mint_token();

        assert_ne!(token1, token2);
        assert_eq!(token1.len(), 36);
        assert!(Uuid::parse_str(&token1).is_ok());
    }

    #[test]
    fn session_keys_carry_the_namespace_prefix() {
        let key = session_key("abc-123");
        assert_eq!(key, "auth_abc-123");
        assert!(key.starts_with(SESSION_KEY_PREFIX));
    }
}
