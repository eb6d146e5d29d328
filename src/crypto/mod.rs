//! Secure transport codec
//!
//! Wraps whole export files in AES-256-GCM under a key derived with scrypt
//! from a user passphrase, so they can sit in untrusted shared storage. The
//! codec never looks inside the plaintext.

mod files;
mod kdf;
mod transport;

pub use files::{FileDecryption, decrypt_file, decrypt_files, encrypt_file};
pub use kdf::{DerivedKey, KEY_LENGTH, KdfParams, derive_key};
pub use transport::{EncryptedBlob, TransportCodec, decrypt, encrypt};
