//! Authentication header computation for the alert source.

use std::sync::Arc;

use xdrvault_core::{AppError, AppResult};
use xdrvault_domain::{ApiCredentials, AuthHeaders, KeyType};

use crate::clock::{Clock, SystemClock};

/// Nonce length mandated by the advanced scheme.
const NONCE_LENGTH: usize = 64;

const NONCE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Source of cryptographically secure nonce strings.
///
/// The advanced scheme's replay protection holds only when nonce bytes come
/// from a CSPRNG; a general-purpose generator voids it.
pub trait NonceSource: Send + Sync {
    /// Returns a nonce of `length` characters drawn uniformly from
    /// `[A-Za-z0-9]`.
    fn alphanumeric_nonce(&self, length: usize) -> AppResult<String>;
}

/// Nonce source backed by the operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemNonceSource;

impl NonceSource for SystemNonceSource {
    fn alphanumeric_nonce(&self, length: usize) -> AppResult<String> {
        // 62 does not divide 256, so bytes at or above the largest multiple
        // of 62 are rejected to keep the draw uniform.
        let bound = (256 / NONCE_ALPHABET.len()) * NONCE_ALPHABET.len();
        let mut nonce = String::with_capacity(length);
        let mut buffer = [0_u8; 128];

        while nonce.len() < length {
            getrandom::fill(&mut buffer).map_err(|error| {
                AppError::Internal(format!("failed to read nonce bytes: {error}"))
            })?;

            for byte in buffer {
                if nonce.len() == length {
                    break;
                }
                if (byte as usize) < bound {
                    nonce.push(NONCE_ALPHABET[(byte as usize) % NONCE_ALPHABET.len()] as char);
                }
            }
        }

        Ok(nonce)
    }
}

/// Computes the authentication headers for one API request.
///
/// Headers are regenerated per request; the advanced scheme's nonce and
/// timestamp are single-use and must never be reused.
pub struct SignerService {
    clock: Arc<dyn Clock>,
    nonce_source: Arc<dyn NonceSource>,
}

impl SignerService {
    /// Creates a signer with the system clock and OS CSPRNG.
    #[must_use]
    pub fn new() -> Self {
        Self::with_collaborators(Arc::new(SystemClock), Arc::new(SystemNonceSource))
    }

    /// Creates a signer with explicit clock and nonce collaborators.
    #[must_use]
    pub fn with_collaborators(clock: Arc<dyn Clock>, nonce_source: Arc<dyn NonceSource>) -> Self {
        Self {
            clock,
            nonce_source,
        }
    }

    /// Produces the header set for one request.
    pub fn sign(&self, credentials: &ApiCredentials) -> AppResult<AuthHeaders> {
        let mut headers = AuthHeaders::new();

        match credentials.key_type() {
            KeyType::Standard => {
                headers.insert("Authorization", credentials.key());
                headers.insert("x-xdr-auth-id", credentials.key_id().to_string());
            }
            KeyType::Advanced => {
                let nonce = self.nonce_source.alphanumeric_nonce(NONCE_LENGTH)?;
                let timestamp = self.clock.now_utc().timestamp_millis();
                let auth_key = format!("{}{}{}", credentials.key(), nonce, timestamp);
                let signature = lowercase_sha256_hex(auth_key.as_bytes());

                headers.insert("x-xdr-timestamp", timestamp.to_string());
                headers.insert("x-xdr-nonce", nonce);
                headers.insert("x-xdr-auth-id", credentials.key_id().to_string());
                headers.insert("Authorization", signature);
            }
        }

        Ok(headers)
    }
}

impl Default for SignerService {
    fn default() -> Self {
        Self::new()
    }
}

/// Computes the SHA-256 digest rendered as lowercase hex.
fn lowercase_sha256_hex(bytes: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    use std::fmt::Write;

    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let result = hasher.finalize();

    result
        .iter()
        .fold(String::with_capacity(64), |mut acc, byte| {
            let _ = write!(acc, "{byte:02x}");
            acc
        })
}
