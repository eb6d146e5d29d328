//! Whole-file encryption for shared storage

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use zeroize::Zeroizing;

use super::transport::TransportCodec;
use crate::error::{Result, SyncError};

/// Per-file result of a batch decryption
#[derive(Debug)]
pub struct FileDecryption {
    pub path: PathBuf,
    pub result: Result<Vec<u8>>,
}

impl FileDecryption {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

impl TransportCodec {
    /// Encrypt a file into an envelope file. Returns the blob size.
    pub fn encrypt_file(&self, input: &Path, output: &Path, passphrase: &str) -> Result<usize> {
        let plaintext = Zeroizing::new(fs::read(input)?);
        let blob = self.encrypt(&plaintext, passphrase)?;

        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(output, blob.as_bytes())?;

        info!(input = %input.display(), output = %output.display(), bytes = blob.len(), "file encrypted");
        Ok(blob.len())
    }

    /// Decrypt an envelope file. Nothing is written unless authentication succeeds.
    pub fn decrypt_file(&self, input: &Path, output: &Path, passphrase: &str) -> Result<usize> {
        let bytes = fs::read(input)?;
        let plaintext = Zeroizing::new(self.decrypt_bytes(&bytes, passphrase)?);

        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(output, plaintext.as_slice())?;

        info!(input = %input.display(), output = %output.display(), bytes = plaintext.len(), "file decrypted");
        Ok(plaintext.len())
    }

    /// Decrypt several envelope files in memory
    ///
    /// A failing file is reported in its own entry and does not stop the rest.
    pub fn decrypt_files<P: AsRef<Path>>(&self, paths: &[P], passphrase: &str) -> Vec<FileDecryption> {
        paths
            .iter()
            .map(|path| {
                let path = path.as_ref();
                let result = fs::read(path)
                    .map_err(SyncError::from)
                    .and_then(|bytes| self.decrypt_bytes(&bytes, passphrase));

                if let Err(e) = &result {
                    warn!(path = %path.display(), error = %e, "file decryption failed");
                }

                FileDecryption {
                    path: path.to_path_buf(),
                    result,
                }
            })
            .collect()
    }
}

/// Encrypt a file with the default scrypt cost
pub fn encrypt_file(input: &Path, output: &Path, passphrase: &str) -> Result<usize> {
    TransportCodec::default().encrypt_file(input, output, passphrase)
}

/// Decrypt a file with the default scrypt cost
pub fn decrypt_file(input: &Path, output: &Path, passphrase: &str) -> Result<usize> {
    TransportCodec::default().decrypt_file(input, output, passphrase)
}

/// Decrypt several files with the default scrypt cost
pub fn decrypt_files<P: AsRef<Path>>(paths: &[P], passphrase: &str) -> Vec<FileDecryption> {
    TransportCodec::default().decrypt_files(paths, passphrase)
}
