//! Password-encrypted wallet vaults using scrypt + AES-256-GCM
//!
//! A vault is one file holding a whole [`WalletBatch`](crate::wallet::record::WalletBatch).
//!
//! ## Security Properties
//!
//! - **Key Derivation**: scrypt, N = 2^14, r = 8, p = 1, fresh 16-byte salt
//!   per vault
//! - **Encryption**: AES-256-GCM with a fresh 12-byte nonce per vault
//! - **Failure reporting**: wrong password and corrupted file produce the
//!   same message
//! - **Memory Safety**: derived keys and both plaintext payloads are zeroized
//!
//! ## Architecture
//!
//! ```text
//! WalletBatch ── serde_json ──▶ plaintext
//! password + salt ── scrypt ──▶ 256-bit key
//! key + nonce + plaintext ── AES-256-GCM ──▶ ciphertext‖tag
//! salt ‖ nonce ‖ ciphertext‖tag ──▶ vault file
//! ```
//!
//! ## Usage
//!
//! ```no_run
//! use chainvault::vault::VaultCodec;
//! use chainvault::wallet::record::{WalletBatch, WalletRecord};
//!
//! # fn main() -> anyhow::Result<()> {
//! let batch: WalletBatch = vec![WalletRecord::new("SOL", "addr", "key", "words", "")].into();
//! let bytes = VaultCodec::encode(&batch, "correct horse")?;
//! let restored = VaultCodec::decode(&bytes, "correct horse")?;
//! assert_eq!(batch, restored);
//! # Ok(())
//! # }
//! ```

pub use cipher::VaultCipher;
pub use codec::VaultCodec;
pub use container::VaultContainer;
pub use container::MIN_CONTAINER_LEN;
pub use error::VaultError;
pub use error::DECRYPT_FAILURE_MESSAGE;
pub use kdf::VaultKeyManager;
pub use password::PasswordSource;
pub use password::PasswordStrength;

pub mod cipher;
mod codec;
pub mod container;
mod error;
pub mod kdf;
pub mod password;
