//! Secret wrappers that are zeroized on drop.
//!
//! The client secret and the bearer token both pass through here so they
//! never show up in `Debug` output or linger in memory after the run.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// A string that zeroizes its contents on drop and redacts itself in `Debug`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecureString(String);

impl SecureString {
    pub fn new(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SecureString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecureString {
    fn from(s: &str) -> Self {
        Self::new(s.to_string())
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}
