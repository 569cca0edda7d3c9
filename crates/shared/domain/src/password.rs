//! Password digest value object.
//!
//! Local credentials are stored as hex-encoded SHA-256 digests.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 password digest.
#[derive(Clone)]
pub struct PasswordDigest {
    hex: String,
}

// Don't expose the digest in debug output
impl std::fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordDigest")
            .field("hex", &"[REDACTED]")
            .finish()
    }
}

impl PasswordDigest {
    /// Wrap a stored digest as read from configuration.
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self { hex: hex.into() }
    }

    /// Compute the digest of a plain text credential.
    pub fn digest(plain_text: &str) -> Self {
        let hash = Sha256::digest(plain_text.as_bytes());
        Self {
            hex: hex::encode(hash),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.hex
    }

    pub fn into_string(self) -> String {
        self.hex
    }

    /// Verify a plain text credential against this digest.
    ///
    /// The comparison is byte-for-byte against the lowercase hex encoding.
    pub fn verify(&self, plain_text: &str) -> bool {
        Self::digest(plain_text).hex == self.hex
    }
}

impl PartialEq for PasswordDigest {
    fn eq(&self, other: &Self) -> bool {
        self.hex == other.hex
    }
}

impl Eq for PasswordDigest {}
