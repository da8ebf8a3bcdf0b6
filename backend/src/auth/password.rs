use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 digest of the UTF-8 password.
pub fn hash_password(plain: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plain.as_bytes());
    hex::encode(hasher.finalize())
}

/// Check a plain password against a stored digest.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    hash_password(plain).eq_ignore_ascii_case(hash)
}
