//! Bearer sessions.
//!
//! Tokens are minted by the external auth service, which stores only their
//! SHA-256 digest. This crate never sees a token at rest.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 digest of a bearer token, as stored in `sessions`.
#[must_use]
pub fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_lowercase_hex() {
        assert_eq!(
            hash_token("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
