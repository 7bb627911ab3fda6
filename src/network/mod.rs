//! Address derivation providers.
//!
//! Each supported chain family is one [`NetworkProvider`] variant. A provider
//! turns a BIP-39 seed (or, for Polkadot, the phrase itself) into an address,
//! a private key and a few flat metadata fields; it never sees the vault or
//! the password.

pub mod bitcoin;
pub mod config;
pub mod cosmos;
mod derive;
mod error;
pub mod polkadot;
pub mod registry;
pub mod solana;
pub mod sui;

pub use config::NetworkConfig;
pub use error::GenerationError;
pub use registry::NetworkRegistry;

use serde_json::Value;
use zeroize::Zeroizing;

/// What a provider returns for one seed.
#[derive(Clone, PartialEq)]
pub struct ProviderOutput {
    pub address: String,
    pub private_key: Zeroizing<String>,

    /// extra flat fields in the order they should appear in the record
    pub extra: Vec<(String, Value)>,
}

impl ProviderOutput {
    pub fn new(address: String, private_key: Zeroizing<String>) -> Self {
        Self {
            address,
            private_key,
            extra: vec![],
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }
}

impl std::fmt::Debug for ProviderOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderOutput")
            .field("address", &self.address)
            .field("private_key", &"[REDACTED]")
            .field("extra", &self.extra)
            .finish()
    }
}

/// The supported chain families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum NetworkProvider {
    Bitcoin,
    Cosmos,
    Solana,
    Sui,
    Polkadot,
}

impl NetworkProvider {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bitcoin => bitcoin::NAME,
            Self::Cosmos => cosmos::NAME,
            Self::Solana => solana::NAME,
            Self::Sui => sui::NAME,
            Self::Polkadot => polkadot::NAME,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Bitcoin => bitcoin::SYMBOL,
            Self::Cosmos => cosmos::SYMBOL,
            Self::Solana => solana::SYMBOL,
            Self::Sui => sui::SYMBOL,
            Self::Polkadot => polkadot::SYMBOL,
        }
    }

    /// option keys `configure` understands, for listings
    pub fn option_keys(&self) -> &'static [&'static str] {
        match self {
            Self::Bitcoin => &["mode"],
            Self::Cosmos => &["prefix", "coin_type"],
            Self::Polkadot => &["prefix", "network_name", "symbol"],
            Self::Solana | Self::Sui => &[],
        }
    }

    /// Validate and normalise `key=value` options into the config used for
    /// a whole run.
    ///
    /// Providers without settings accept only an empty option list.
    pub fn configure(&self, options: &[(String, String)]) -> Result<NetworkConfig, GenerationError> {
        match self {
            Self::Bitcoin => bitcoin::configure(options),
            Self::Cosmos => cosmos::configure(options),
            Self::Polkadot => polkadot::configure(options),
            Self::Solana | Self::Sui => match options.first() {
                Some((key, _)) => Err(GenerationError::UnknownOption(key.clone())),
                None => Ok(NetworkConfig::new()),
            },
        }
    }

    /// Derive one wallet from `seed`.
    ///
    /// `mnemonic` is the phrase `seed` came from. Polkadot derives from the
    /// phrase's entropy and ignores `seed`, so the BIP-39 passphrase has no
    /// effect on it.
    pub fn generate(
        &self,
        seed: &[u8],
        config: &NetworkConfig,
        mnemonic: &str,
    ) -> Result<ProviderOutput, GenerationError> {
        match self {
            Self::Bitcoin => bitcoin::generate(seed, config),
            Self::Cosmos => cosmos::generate(seed, config),
            Self::Solana => solana::generate(seed, config),
            Self::Sui => sui::generate(seed, config),
            Self::Polkadot => polkadot::generate(mnemonic, config),
        }
    }
}

impl std::fmt::Display for NetworkProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.name(), self.symbol())
    }
}
