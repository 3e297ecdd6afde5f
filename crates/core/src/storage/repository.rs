use std::path::{Path, PathBuf};

use log::info;

use crate::errors::CoreError;
use crate::models::ledger::Ledger;

use super::envelope::{Envelope, KdfParams};

/// Where a ledger lives between sessions.
///
/// The reducers never see this; the facade loads a [`Ledger`] once and
/// saves it back explicitly.
pub trait LedgerRepository {
    fn load(&self) -> Result<Ledger, CoreError>;
    fn save(&mut self, ledger: &Ledger) -> Result<(), CoreError>;
}

/// Keeps the last saved ledger in memory. Useful for tests and previews.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    stored: Option<Ledger>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ledger(ledger: Ledger) -> Self {
        Self {
            stored: Some(ledger),
        }
    }
}

impl LedgerRepository for MemoryRepository {
    fn load(&self) -> Result<Ledger, CoreError> {
        Ok(self.stored.clone().unwrap_or_default())
    }

    fn save(&mut self, ledger: &Ledger) -> Result<(), CoreError> {
        self.stored = Some(ledger.clone());
        Ok(())
    }
}

/// Plain pretty-printed JSON on disk. A missing file loads as an empty ledger.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerRepository for JsonFileRepository {
    fn load(&self) -> Result<Ledger, CoreError> {
        if !self.path.exists() {
            info!("No ledger at {}; starting empty", self.path.display());
            return Ok(Ledger::default());
        }
        let text = std::fs::read_to_string(&self.path)?;
        let ledger: Ledger = serde_json::from_str(&text)?;
        info!(
            "Loaded {} accounts and {} transactions from {}",
            ledger.accounts.len(),
            ledger.transactions.len(),
            self.path.display()
        );
        Ok(ledger)
    }

    fn save(&mut self, ledger: &Ledger) -> Result<(), CoreError> {
        let text = serde_json::to_string_pretty(ledger)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize ledger: {e}")))?;
        std::fs::write(&self.path, text)?;
        info!("Saved ledger to {}", self.path.display());
        Ok(())
    }
}

/// Password-protected file: bincode payload sealed in an [`Envelope`].
///
/// Unlike the JSON repository, a missing file is an error: there is no
/// way to tell a new ledger from a wrong path.
pub struct EncryptedFileRepository {
    path: PathBuf,
    password: String,
    kdf: KdfParams,
}

impl EncryptedFileRepository {
    pub fn new(path: impl Into<PathBuf>, password: impl Into<String>) -> Self {
        Self::with_kdf(path, password, KdfParams::default())
    }

    pub fn with_kdf(path: impl Into<PathBuf>, password: impl Into<String>, kdf: KdfParams) -> Self {
        Self {
            path: path.into(),
            password: password.into(),
            kdf,
        }
    }

    /// Seal a ledger into portable bytes (for callers that do their own I/O).
    pub fn seal(ledger: &Ledger, password: &str, kdf: KdfParams) -> Result<Vec<u8>, CoreError> {
        let plaintext = bincode::serialize(ledger)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize ledger: {e}")))?;
        Ok(Envelope::seal(&plaintext, password, kdf)?.to_bytes())
    }

    /// Inverse of [`EncryptedFileRepository::seal`].
    pub fn unseal(bytes: &[u8], password: &str) -> Result<Ledger, CoreError> {
        let plaintext = Envelope::from_bytes(bytes)?.open(password)?;
        bincode::deserialize(&plaintext)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize ledger: {e}")))
    }
}

impl std::fmt::Debug for EncryptedFileRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptedFileRepository")
            .field("path", &self.path)
            .field("kdf", &self.kdf)
            .finish_non_exhaustive()
    }
}

impl LedgerRepository for EncryptedFileRepository {
    fn load(&self) -> Result<Ledger, CoreError> {
        let bytes = std::fs::read(&self.path)?;
        let ledger = Self::unseal(&bytes, &self.password)?;
        info!("Loaded encrypted ledger from {}", self.path.display());
        Ok(ledger)
    }

    fn save(&mut self, ledger: &Ledger) -> Result<(), CoreError> {
        let bytes = Self::seal(ledger, &self.password, self.kdf)?;
        std::fs::write(&self.path, bytes)?;
        info!("Saved encrypted ledger to {}", self.path.display());
        Ok(())
    }
}
