//! # Password Checksum
//!
//! The original system's non-cryptographic credential check, preserved
//! as-is: a djb2 checksum of the password bytes rendered as a decimal
//! string. This is an access gate for a single-operator console, not a
//! security boundary - do not upgrade it without also migrating the
//! stored hashes in `users.dat`.

/// Hashes a password with djb2 (`hash * 33 + byte`, seeded with 5381) and
/// renders the result as a decimal string.
pub fn hash_password(password: &str) -> String {
    let mut hash: u64 = 5381;
    for &byte in password.as_bytes() {
        hash = hash.wrapping_mul(33).wrapping_add(u64::from(byte));
    }
    hash.to_string()
}

/// Checks a candidate password against a stored checksum string.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    hash_password(password) == stored_hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_and_distinct() {
        assert_eq!(hash_password("admin123"), hash_password("admin123"));
        assert_ne!(hash_password("admin123"), hash_password("admin124"));
        assert_ne!(hash_password(""), hash_password(" "));
    }

    #[test]
    fn empty_password_hashes_to_seed() {
        assert_eq!(hash_password(""), "5381");
    }

    #[test]
    fn verify_round_trip() {
        let stored = hash_password("hunter2");
        assert!(verify_password("hunter2", &stored));
        assert!(!verify_password("hunter3", &stored));
        assert!(!verify_password("Hunter2", &stored));
    }
}
