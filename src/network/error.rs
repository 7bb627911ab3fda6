//! provides error types related to deriving wallets.

/// enumerates possible wallet generation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("mnemonic error: {0}")]
    Mnemonic(String),

    #[error("key derivation failed at {path}: {reason}")]
    Derivation { path: String, reason: String },

    #[error("invalid value for option `{key}`: {reason}")]
    InvalidOption { key: String, reason: String },

    #[error("unknown option `{0}`")]
    UnknownOption(String),

    #[error("unknown network `{0}`")]
    UnknownNetwork(String),

    #[error("wallet count must be at least 1")]
    ZeroCount,

    #[error("no wallets generated: all {attempted} attempts failed")]
    EmptyBatch { attempted: usize },
}

impl GenerationError {
    pub(crate) fn derivation(path: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Derivation {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn invalid_option(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
