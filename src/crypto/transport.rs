//! AES-256-GCM transport envelope
//!
//! Blob layout (byte-exact, no version marker):
//!
//! ```text
//! salt (32) || iv (16) || tag (16) || ciphertext (variable)
//! ```
//!
//! Every encryption draws a fresh salt and IV. Decryption failures of any
//! kind (short input, wrong passphrase, altered bytes) surface as the single
//! [`SyncError::AuthenticationFailure`].

use aes_gcm::aead::AeadInPlace;
use aes_gcm::aead::consts::U16;
use aes_gcm::aes::Aes256;
use aes_gcm::{AesGcm, KeyInit, Nonce, Tag};
use rand::RngCore;
use tracing::debug;
use zeroize::Zeroizing;

use super::kdf::{KdfParams, derive_key};
use crate::error::{Result, SyncError};
use crate::{BLOB_HEADER_LENGTH, IV_LENGTH, SALT_LENGTH, TAG_LENGTH};

/// AES-256-GCM with a 16-byte IV
type Aes256Gcm16 = AesGcm<Aes256, U16>;

const IV_OFFSET: usize = SALT_LENGTH;
const TAG_OFFSET: usize = SALT_LENGTH + IV_LENGTH;

/// Serialized envelope
#[derive(Clone, PartialEq, Eq)]
pub struct EncryptedBlob(Vec<u8>);

impl EncryptedBlob {
    /// Wrap raw bytes, rejecting input too short to hold the header
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() < BLOB_HEADER_LENGTH {
            return Err(SyncError::AuthenticationFailure);
        }
        Ok(Self(bytes))
    }

    pub fn salt(&self) -> &[u8] {
        &self.0[..IV_OFFSET]
    }

    pub fn iv(&self) -> &[u8] {
        &self.0[IV_OFFSET..TAG_OFFSET]
    }

    pub fn tag(&self) -> &[u8] {
        &self.0[TAG_OFFSET..BLOB_HEADER_LENGTH]
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.0[BLOB_HEADER_LENGTH..]
    }

    /// Whole blob as written to storage
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the blob carries no ciphertext (empty plaintext)
    pub fn is_empty(&self) -> bool {
        self.0.len() == BLOB_HEADER_LENGTH
    }
}

impl std::fmt::Debug for EncryptedBlob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptedBlob")
            .field("len", &self.0.len())
            .finish()
    }
}

impl AsRef<[u8]> for EncryptedBlob {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Passphrase-based envelope codec
///
/// Stateless apart from its KDF cost, so one codec can serve any number of
/// files from any number of threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportCodec {
    params: KdfParams,
}

impl TransportCodec {
    /// Create a codec with explicit scrypt cost
    pub fn new(params: KdfParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &KdfParams {
        &self.params
    }

    /// Encrypt plaintext under a passphrase
    pub fn encrypt(&self, plaintext: &[u8], passphrase: &str) -> Result<EncryptedBlob> {
        let mut salt = [0u8; SALT_LENGTH];
        let mut iv = [0u8; IV_LENGTH];
        let mut rng = rand::rng();
        rng.fill_bytes(&mut salt);
        rng.fill_bytes(&mut iv);

        let key = derive_key(passphrase.as_bytes(), &salt, &self.params)?;
        let cipher = Aes256Gcm16::new_from_slice(&key[..])
            .map_err(|e| SyncError::EncryptionError(e.to_string()))?;

        let mut bytes = Vec::with_capacity(BLOB_HEADER_LENGTH + plaintext.len());
        bytes.extend_from_slice(&salt);
        bytes.extend_from_slice(&iv);
        bytes.extend_from_slice(&[0u8; TAG_LENGTH]);
        bytes.extend_from_slice(plaintext);

        let tag = cipher
            .encrypt_in_place_detached(Nonce::<U16>::from_slice(&iv), b"", &mut bytes[BLOB_HEADER_LENGTH..])
            .map_err(|e| SyncError::EncryptionError(e.to_string()))?;
        bytes[TAG_OFFSET..BLOB_HEADER_LENGTH].copy_from_slice(&tag);

        debug!(plaintext_len = plaintext.len(), blob_len = bytes.len(), "encrypted transport blob");
        Ok(EncryptedBlob(bytes))
    }

    /// Decrypt a blob, or fail with [`SyncError::AuthenticationFailure`]
    pub fn decrypt(&self, blob: &EncryptedBlob, passphrase: &str) -> Result<Vec<u8>> {
        let key = derive_key(passphrase.as_bytes(), blob.salt(), &self.params)?;
        let cipher = Aes256Gcm16::new_from_slice(&key[..])
            .map_err(|_| SyncError::AuthenticationFailure)?;

        // Holds unauthenticated plaintext if the tag check fails
        let mut buffer = Zeroizing::new(blob.ciphertext().to_vec());
        cipher
            .decrypt_in_place_detached(
                Nonce::<U16>::from_slice(blob.iv()),
                b"",
                &mut buffer[..],
                Tag::from_slice(blob.tag()),
            )
            .map_err(|_| SyncError::AuthenticationFailure)?;

        debug!(blob_len = blob.len(), "decrypted transport blob");
        Ok(std::mem::take(&mut *buffer))
    }

    /// Decrypt raw bytes as read from storage
    pub fn decrypt_bytes(&self, bytes: &[u8], passphrase: &str) -> Result<Vec<u8>> {
        let blob = EncryptedBlob::from_bytes(bytes.to_vec())?;
        self.decrypt(&blob, passphrase)
    }
}

/// Encrypt with the default scrypt cost
pub fn encrypt(plaintext: &[u8], passphrase: &str) -> Result<EncryptedBlob> {
    TransportCodec::default().encrypt(plaintext, passphrase)
}

/// Decrypt raw blob bytes with the default scrypt cost
pub fn decrypt(bytes: &[u8], passphrase: &str) -> Result<Vec<u8>> {
    TransportCodec::default().decrypt_bytes(bytes, passphrase)
}
