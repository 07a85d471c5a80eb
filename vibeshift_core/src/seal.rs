//! Sealed proof codec.
//!
//! Audit records are encrypted with AES-256-GCM under a key derived by
//! HKDF-SHA256 from a shared secret:
//!
//! - IKM: the secret bytes
//! - salt: UTF-8 bytes of the pool identifier
//! - info: `b"vibeshift-seal-v1"`
//! - output: 32 bytes
//!
//! The derivation is the compatibility contract with the independent
//! decoder, so none of these parameters may change without bumping
//! [`SEAL_VERSION`]. On the wire the envelope is a JSON object
//! `{"v", "iv", "ct", "policy"}` with standard padded base64 for the binary
//! fields.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hkdf::Hkdf;
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

pub const SEAL_SCHEME: &str = "vibeshift-seal-v1";
pub const HKDF_INFO: &[u8; 17] = b"vibeshift-seal-v1";
pub const SEAL_VERSION: u64 = 1;
pub const NONCE_LEN: usize = 12;
pub const KEY_LEN: usize = 32;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SealError {
    /// Envelope written by a scheme version this build cannot read.
    #[error("unsupported envelope version: {0}")]
    UnsupportedVersion(u64),
    /// GCM tag did not verify: wrong secret, wrong pool id, or tampered data.
    #[error("envelope authentication failed")]
    AuthenticationFailure,
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),
    #[error("envelope encoding failed: {0}")]
    Encoding(String),
    #[error("encryption failed")]
    Encryption,
}

/// Versioned AES-GCM wrapper around an audit record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EnvelopeWire", into = "EnvelopeWire")]
pub struct SealedEnvelope {
    pub version: u64,
    pub iv: [u8; NONCE_LEN],
    /// Ciphertext with the 16-byte GCM tag appended.
    pub ciphertext: Vec<u8>,
    pub policy: String,
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct EnvelopeWire {
    v: u64,
    iv: String,
    ct: String,
    policy: String,
}

impl From<SealedEnvelope> for EnvelopeWire {
    fn from(env: SealedEnvelope) -> Self {
        EnvelopeWire {
            v: env.version,
            iv: BASE64.encode(env.iv),
            ct: BASE64.encode(&env.ciphertext),
            policy: env.policy,
        }
    }
}

impl TryFrom<EnvelopeWire> for SealedEnvelope {
    type Error = SealError;

    fn try_from(wire: EnvelopeWire) -> Result<Self, Self::Error> {
        let iv_bytes = BASE64
            .decode(wire.iv.as_bytes())
            .map_err(|e| SealError::MalformedEnvelope(format!("iv: {e}")))?;
        let iv: [u8; NONCE_LEN] = iv_bytes.as_slice().try_into().map_err(|_| {
            SealError::MalformedEnvelope(format!("iv must be {NONCE_LEN} bytes, got {}", iv_bytes.len()))
        })?;
        let ciphertext = BASE64
            .decode(wire.ct.as_bytes())
            .map_err(|e| SealError::MalformedEnvelope(format!("ct: {e}")))?;
        Ok(SealedEnvelope {
            version: wire.v,
            iv,
            ciphertext,
            policy: wire.policy,
        })
    }
}

impl SealedEnvelope {
    pub fn to_json(&self) -> Result<String, SealError> {
        serde_json::to_string(self).map_err(|e| SealError::Encoding(e.to_string()))
    }

    /// Parse the wire form. The version is not checked here so that
    /// [`unseal`] can report `UnsupportedVersion` distinctly.
    pub fn from_json(bytes: &[u8]) -> Result<Self, SealError> {
        serde_json::from_slice(bytes).map_err(|e| SealError::MalformedEnvelope(e.to_string()))
    }
}

/// `"vibeshift-seal-v1:<pool_id>"`
pub fn policy_label(pool_id: &str) -> String {
    format!("{SEAL_SCHEME}:{pool_id}")
}

/// HKDF-SHA256(ikm = secret, salt = pool_id, info = HKDF_INFO) -> 32 bytes.
pub fn derive_key(secret: &[u8], pool_id: &str) -> [u8; KEY_LEN] {
    let hk = Hkdf::<Sha256>::new(Some(pool_id.as_bytes()), secret);
    let mut okm = [0u8; KEY_LEN];
    // KEY_LEN <= 255 * HashLen, so expand cannot fail.
    hk.expand(HKDF_INFO, &mut okm)
        .expect("32 bytes is a valid HKDF-SHA256 output length");
    okm
}

/// Encrypt `record` under a fresh random nonce.
pub fn seal(record: &[u8], secret: &[u8], pool_id: &str) -> Result<SealedEnvelope, SealError> {
    let mut iv = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut iv);
    seal_with_nonce(record, secret, pool_id, iv)
}

pub(crate) fn seal_with_nonce(
    record: &[u8],
    secret: &[u8],
    pool_id: &str,
    iv: [u8; NONCE_LEN],
) -> Result<SealedEnvelope, SealError> {
    let key = derive_key(secret, pool_id);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key));
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&iv), record)
        .map_err(|_| SealError::Encryption)?;

    Ok(SealedEnvelope {
        version: SEAL_VERSION,
        iv,
        ciphertext,
        policy: policy_label(pool_id),
    })
}

/// Decrypt an envelope.
///
/// The version is checked before any key derivation; a mismatch is
/// `UnsupportedVersion`. Tag failures are `AuthenticationFailure` and must
/// not be retried with another key.
pub fn unseal(envelope: &SealedEnvelope, secret: &[u8], pool_id: &str) -> Result<Vec<u8>, SealError> {
    if envelope.version != SEAL_VERSION {
        return Err(SealError::UnsupportedVersion(envelope.version));
    }

    let key = derive_key(secret, pool_id);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key));
    cipher
        .decrypt(Nonce::from_slice(&envelope.iv), envelope.ciphertext.as_slice())
        .map_err(|_| SealError::AuthenticationFailure)
}
