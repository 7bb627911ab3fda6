//! error types for the vault subsystem.

/// message shown for every decrypt-side failure.
///
/// authentication and structural failures share this text so that a caller
/// can never tell a wrong password apart from a damaged file.
pub const DECRYPT_FAILURE_MESSAGE: &str = "wrong password or corrupted file";

/// enumerates the ways encoding or decoding a vault can fail
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum VaultError {
    /// key derivation or cipher was wired with invalid parameters.
    #[error("invalid vault configuration: {0}")]
    Configuration(String),

    /// tag verification failed: wrong password or altered bytes.
    #[error("{}", DECRYPT_FAILURE_MESSAGE)]
    Authentication,

    /// container too short, or decrypted payload is not a wallet batch.
    ///
    /// `detail` is for logs only and is not part of the display text.
    #[error("{}", DECRYPT_FAILURE_MESSAGE)]
    MalformedContainer { detail: String },
}

impl VaultError {
    pub(crate) fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedContainer {
            detail: detail.into(),
        }
    }

    /// true for the failures a user can cause by supplying a bad file or
    /// password, as opposed to programming errors.
    pub fn is_decrypt_failure(&self) -> bool {
        matches!(self, Self::Authentication | Self::MalformedContainer { .. })
    }
}
