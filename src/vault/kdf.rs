//! scrypt key derivation for vault encryption
//!
//! Turns a user password and a per-container salt into the 256-bit key fed to
//! AES-256-GCM. The cost parameters are part of the container format: vaults
//! carry no version tag, so every reader and writer must agree on them.

use rand::Rng;
use scrypt::Params;
use zeroize::Zeroizing;

use super::error::VaultError;

/// byte length of the random salt stored at the start of every container
pub const SALT_LEN: usize = 16;

/// byte length of the derived symmetric key
pub const KEY_LEN: usize = 32;

/// scrypt CPU/memory cost, as log2(N). N = 2^14.
pub const SCRYPT_LOG_N: u8 = 14;

/// scrypt block size
pub const SCRYPT_R: u32 = 8;

/// scrypt parallelization
pub const SCRYPT_P: u32 = 1;

/// Holds the symmetric key derived from a password for one encode or decode
/// call. The key is zeroed on drop and never leaves memory.
pub struct VaultKeyManager {
    key: Zeroizing<[u8; KEY_LEN]>,
}

impl VaultKeyManager {
    /// Derive the vault key from `password` and `salt` using scrypt
    /// (N = 2^14, r = 8, p = 1).
    ///
    /// Deterministic: identical inputs always produce the identical key.
    ///
    /// # Errors
    ///
    /// [`VaultError::Configuration`] if `salt` is not exactly [`SALT_LEN`]
    /// bytes long.
    pub fn from_password(password: &str, salt: &[u8]) -> Result<Self, VaultError> {
        if salt.len() != SALT_LEN {
            return Err(VaultError::Configuration(format!(
                "salt must be {} bytes, got {}",
                SALT_LEN,
                salt.len()
            )));
        }

        let params = Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, KEY_LEN)
            .map_err(|e| VaultError::Configuration(format!("invalid scrypt parameters: {}", e)))?;

        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        scrypt::scrypt(password.as_bytes(), salt, &params, &mut *key)
            .map_err(|e| VaultError::Configuration(format!("scrypt output length: {}", e)))?;

        Ok(Self { key })
    }

    /// Generate a fresh random salt for a new container
    pub fn generate_salt() -> [u8; SALT_LEN] {
        let mut salt = [0u8; SALT_LEN];
        rand::rng().fill(&mut salt);
        salt
    }

    pub(crate) fn key(&self) -> &[u8; KEY_LEN] {
        &self.key
    }
}

impl std::fmt::Debug for VaultKeyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultKeyManager")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl Drop for VaultKeyManager {
    fn drop(&mut self) {
        // the Zeroizing wrapper clears the bytes
        tracing::trace!("zeroing vault key");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_inputs_same_key() {
        let salt = [7u8; SALT_LEN];

        let km1 = VaultKeyManager::from_password("correct horse", &salt).unwrap();
        let km2 = VaultKeyManager::from_password("correct horse", &salt).unwrap();

        assert_eq!(km1.key(), km2.key());
    }

    #[test]
    fn different_salts_different_keys() {
        let km1 = VaultKeyManager::from_password("pw", &[1u8; SALT_LEN]).unwrap();
        let km2 = VaultKeyManager::from_password("pw", &[2u8; SALT_LEN]).unwrap();

        assert_ne!(km1.key(), km2.key());
    }

    #[test]
    fn different_passwords_different_keys() {
        let salt = [3u8; SALT_LEN];
        let km1 = VaultKeyManager::from_password("correct horse", &salt).unwrap();
        let km2 = VaultKeyManager::from_password("wrong horse", &salt).unwrap();

        assert_ne!(km1.key(), km2.key());
    }

    #[test]
    fn empty_password_is_accepted() {
        let km = VaultKeyManager::from_password("", &[0u8; SALT_LEN]).unwrap();
        assert_ne!(km.key(), &[0u8; KEY_LEN]);
    }

    #[test]
    fn bad_salt_lengths_are_configuration_errors() {
        for len in [0, 1, SALT_LEN - 1, SALT_LEN + 1, 32] {
            let salt = vec![0u8; len];
            let err = VaultKeyManager::from_password("pw", &salt).unwrap_err();
            assert!(matches!(err, VaultError::Configuration(_)), "len {}", len);
        }
    }

    /// RFC 7914 section 12, third vector, uses the same N, r and p as vaults.
    /// A change here means existing vaults become unreadable.
    #[test]
    fn cost_parameters_match_rfc7914_vector() {
        let params = Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, 64).unwrap();
        let mut output = [0u8; 64];
        scrypt::scrypt(b"pleaseletmein", b"SodiumChloride", &params, &mut output).unwrap();

        assert_eq!(
            "7023bdcb3afd7348461c06cd81fd38ebfda8fbba904f8e3ea9b543f6545da1f2\
             d5432955613f0fcf62d49705242a9af9e61e85dc0d651e40dfcf017b45575887",
            hex::encode(output)
        );
    }

    #[test]
    fn debug_output_hides_key() {
        let km = VaultKeyManager::from_password("pw", &[9u8; SALT_LEN]).unwrap();
        let rendered = format!("{:?}", km);
        assert!(rendered.contains("REDACTED"));
        assert!(!rendered.contains(&hex::encode(km.key())));
    }

    #[test]
    fn generated_salts_differ() {
        let salt1 = VaultKeyManager::generate_salt();
        let salt2 = VaultKeyManager::generate_salt();

        assert_ne!(salt1, salt2);
    }
}
