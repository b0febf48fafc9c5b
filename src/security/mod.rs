//! Security Module
//!
//! Collaborators the record store consumes through narrow traits:
//! - `PasswordHasher`: one-way hashing for the login table (Argon2id)
//! - `TextCipher`: reversible text obfuscation for display text only
//!
//! The cipher is never used for stored credentials.

mod cipher;
mod password;

pub use cipher::ShiftCipher;
pub use password::Argon2Hasher;

use crate::error::Result;

/// One-way password hashing
pub trait PasswordHasher {
    /// Hash `password` into a self-describing string (salt included)
    fn hash(&self, password: &str) -> Result<String>;

    /// Check `password` against a string produced by `hash`
    fn verify(&self, password: &str, hash: &str) -> Result<bool>;
}

/// Reversible text transform
pub trait TextCipher {
    fn encrypt(&self, text: &str) -> String;
    fn decrypt(&self, text: &str) -> String;
}
