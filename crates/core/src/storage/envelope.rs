use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::errors::CoreError;

/// Magic bytes at the start of an encrypted ledger file.
pub const MAGIC: &[u8; 4] = b"AFLW";

/// Current envelope layout version.
pub const CURRENT_VERSION: u16 = 1;

/// magic(4) + version(2) + kdf(12) + salt(16) + nonce(12) + ciphertext_len(8)
pub const HEADER_LEN: usize = 54;

/// Argon2id cost parameters, stored in the header so old files stay
/// readable when the defaults change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// KiB
    pub memory_cost: u32,
    pub time_cost: u32,
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_cost: 65_536,
            time_cost: 3,
            parallelism: 4,
        }
    }
}

impl KdfParams {
    /// Reject parameters outside safe bounds, so a crafted header cannot
    /// make us allocate gigabytes or spin for minutes.
    pub fn check_bounds(&self) -> Result<(), CoreError> {
        if !(8..=1_048_576).contains(&self.memory_cost) {
            return Err(CoreError::InvalidFileFormat(format!(
                "KDF memory_cost out of range: {} KiB (expected 8..=1048576)",
                self.memory_cost
            )));
        }
        if !(1..=20).contains(&self.time_cost) {
            return Err(CoreError::InvalidFileFormat(format!(
                "KDF time_cost out of range: {} (expected 1..=20)",
                self.time_cost
            )));
        }
        if !(1..=16).contains(&self.parallelism) {
            return Err(CoreError::InvalidFileFormat(format!(
                "KDF parallelism out of range: {} (expected 1..=16)",
                self.parallelism
            )));
        }
        Ok(())
    }

    /// Derive a 256-bit key from `password` and `salt` with Argon2id.
    pub fn derive_key(&self, password: &str, salt: &[u8; 16]) -> Result<[u8; 32], CoreError> {
        let params = Params::new(self.memory_cost, self.time_cost, self.parallelism, Some(32))
            .map_err(|e| CoreError::Encryption(format!("Invalid Argon2 params: {e}")))?;

        let mut key = [0u8; 32];
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
            .hash_password_into(password.as_bytes(), salt, &mut key)
            .map_err(|e| CoreError::Encryption(format!("Key derivation failed: {e}")))?;
        Ok(key)
    }
}

/// Password-sealed payload: AES-256-GCM ciphertext plus everything needed
/// to re-derive the key.
///
/// Byte layout (integers little-endian):
/// ```text
/// [AFLW] [version u16] [memory_cost u32] [time_cost u32] [parallelism u32]
/// [salt 16B] [nonce 12B] [ciphertext_len u64] [ciphertext + tag]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub version: u16,
    pub kdf: KdfParams,
    pub salt: [u8; 16],
    pub nonce: [u8; 12],
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Encrypt `plaintext` under a key derived from `password`, with a fresh
    /// random salt and nonce.
    pub fn seal(plaintext: &[u8], password: &str, kdf: KdfParams) -> Result<Self, CoreError> {
        let salt: [u8; 16] = random_bytes()?;
        let nonce: [u8; 12] = random_bytes()?;
        let key = kdf.derive_key(password, &salt)?;

        let ciphertext = cipher(&key)?
            .encrypt(Nonce::from_slice(&nonce), plaintext)
            .map_err(|e| CoreError::Encryption(format!("Encryption failed: {e}")))?;

        Ok(Self {
            version: CURRENT_VERSION,
            kdf,
            salt,
            nonce,
            ciphertext,
        })
    }

    /// Decrypt with `password`. A wrong password and a tampered file both
    /// surface as [`CoreError::Decryption`].
    pub fn open(&self, password: &str) -> Result<Vec<u8>, CoreError> {
        let key = self.kdf.derive_key(password, &self.salt)?;
        Ok(cipher(&key)?.decrypt(Nonce::from_slice(&self.nonce), self.ciphertext.as_slice())?)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(HEADER_LEN + self.ciphertext.len());
        buf.extend_from_slice(MAGIC);
        buf.extend_from_slice(&self.version.to_le_bytes());
        buf.extend_from_slice(&self.kdf.memory_cost.to_le_bytes());
        buf.extend_from_slice(&self.kdf.time_cost.to_le_bytes());
        buf.extend_from_slice(&self.kdf.parallelism.to_le_bytes());
        buf.extend_from_slice(&self.salt);
        buf.extend_from_slice(&self.nonce);
        buf.extend_from_slice(&(self.ciphertext.len() as u64).to_le_bytes());
        buf.extend_from_slice(&self.ciphertext);
        buf
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, CoreError> {
        if data.len() < HEADER_LEN {
            return Err(CoreError::InvalidFileFormat(
                "File too small to be an encrypted ledger".into(),
            ));
        }

        let mut reader = ByteReader { data, pos: 0 };
        if reader.take::<4>()? != *MAGIC {
            return Err(CoreError::InvalidFileFormat(
                "Invalid magic bytes — not an encrypted ledger".into(),
            ));
        }

        let version = u16::from_le_bytes(reader.take()?);
        if version == 0 || version > CURRENT_VERSION {
            return Err(CoreError::UnsupportedVersion(version));
        }

        let kdf = KdfParams {
            memory_cost: u32::from_le_bytes(reader.take()?),
            time_cost: u32::from_le_bytes(reader.take()?),
            parallelism: u32::from_le_bytes(reader.take()?),
        };
        kdf.check_bounds()?;

        let salt = reader.take::<16>()?;
        let nonce = reader.take::<12>()?;
        let ciphertext_len = u64::from_le_bytes(reader.take()?);

        let remaining = data.len() - reader.pos;
        if (remaining as u64) < ciphertext_len {
            return Err(CoreError::InvalidFileFormat(format!(
                "File truncated: expected {ciphertext_len} bytes of ciphertext, got {remaining}"
            )));
        }
        let end = reader.pos + ciphertext_len as usize;

        Ok(Self {
            version,
            kdf,
            salt,
            nonce,
            ciphertext: data[reader.pos..end].to_vec(),
        })
    }
}

struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl ByteReader<'_> {
    fn take<const N: usize>(&mut self) -> Result<[u8; N], CoreError> {
        let bytes: [u8; N] = self
            .data
            .get(self.pos..self.pos + N)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| CoreError::InvalidFileFormat("Unexpected end of header".into()))?;
        self.pos += N;
        Ok(bytes)
    }
}

fn cipher(key: &[u8; 32]) -> Result<Aes256Gcm, CoreError> {
    Aes256Gcm::new_from_slice(key)
        .map_err(|e| CoreError::Encryption(format!("Failed to create cipher: {e}")))
}

fn random_bytes<const N: usize>() -> Result<[u8; N], CoreError> {
    let mut buf = [0u8; N];
    getrandom::getrandom(&mut buf)
        .map_err(|e| CoreError::Encryption(format!("Failed to gather randomness: {e}")))?;
    Ok(buf)
}
