//! Password hashing.
//!
//! New hashes are Argon2id PHC strings with a random salt. Databases
//! created by the earlier site stored bare, unsalted SHA-256 hex digests;
//! those still verify so existing admins can log in, and the caller is told
//! to replace them.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, SaltString},
    Argon2, PasswordVerifier,
};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordCheck {
    Valid,
    /// Matched a legacy SHA-256 digest; the hash should be upgraded.
    ValidLegacy,
    Invalid,
}

impl PasswordCheck {
    pub fn is_valid(self) -> bool {
        !matches!(self, PasswordCheck::Invalid)
    }
}

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
}

pub fn verify_password(password: &str, stored_hash: &str) -> PasswordCheck {
    if let Ok(parsed_hash) = PasswordHash::new(stored_hash) {
        return if Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
        {
            PasswordCheck::Valid
        } else {
            PasswordCheck::Invalid
        };
    }

    if is_legacy_digest(stored_hash) {
        let digest = hex::encode(Sha256::digest(password.as_bytes()));
        if digest.eq_ignore_ascii_case(stored_hash) {
            return PasswordCheck::ValidLegacy;
        }
    }

    PasswordCheck::Invalid
}

fn is_legacy_digest(stored_hash: &str) -> bool {
    stored_hash.len() == 64 && stored_hash.chars().all(|c| c.is_ascii_hexdigit())
}
