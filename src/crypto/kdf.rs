//! Passphrase key derivation
//!
//! scrypt over the passphrase and a per-blob salt, producing one AES-256 key.
//! The default cost matches the interactive defaults most scrypt bindings
//! ship with (N = 2^14, r = 8, p = 1), so blobs interoperate with them.

use zeroize::Zeroizing;

use crate::error::{Result, SyncError};
use crate::{SCRYPT_LOG_N, SCRYPT_P, SCRYPT_R};

/// Key length for AES-256 (32 bytes = 256 bits)
pub const KEY_LENGTH: usize = 32;

/// Derived key, wiped on drop
pub type DerivedKey = Zeroizing<[u8; KEY_LENGTH]>;

/// scrypt cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// log2 of the CPU/memory cost N
    pub log_n: u8,
    /// Block size
    pub r: u32,
    /// Parallelization
    pub p: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            log_n: SCRYPT_LOG_N,
            r: SCRYPT_R,
            p: SCRYPT_P,
        }
    }
}

impl KdfParams {
    /// Create parameters, rejecting values scrypt cannot run with
    pub fn new(log_n: u8, r: u32, p: u32) -> Result<Self> {
        let params = Self { log_n, r, p };
        params.validate()?;
        Ok(params)
    }

    /// Check the parameters without deriving anything
    pub fn validate(&self) -> Result<()> {
        self.to_scrypt().map(|_| ())
    }

    fn to_scrypt(self) -> Result<scrypt::Params> {
        scrypt::Params::new(self.log_n, self.r, self.p, KEY_LENGTH)
            .map_err(|e| SyncError::KeyDerivationError(e.to_string()))
    }
}

/// Derive a 256-bit key from a passphrase and salt
pub fn derive_key(passphrase: &[u8], salt: &[u8], params: &KdfParams) -> Result<DerivedKey> {
    let scrypt_params = params.to_scrypt()?;

    let mut key = Zeroizing::new([0u8; KEY_LENGTH]);
    scrypt::scrypt(passphrase, salt, &scrypt_params, &mut key[..])
        .map_err(|e| SyncError::KeyDerivationError(e.to_string()))?;

    Ok(key)
}
