use itertools::Itertools;
use strum::IntoEnumIterator;

use super::GenerationError;
use super::NetworkProvider;

/// Ordered table of the providers available to this process.
///
/// Built once at start-up and passed by reference.
#[derive(Debug, Clone)]
pub struct NetworkRegistry {
    providers: Vec<NetworkProvider>,
}

impl NetworkRegistry {
    /// every built-in provider, in listing order
    pub fn with_defaults() -> Self {
        Self {
            providers: NetworkProvider::iter().collect(),
        }
    }

    pub fn from_providers(providers: impl IntoIterator<Item = NetworkProvider>) -> Self {
        Self {
            providers: providers.into_iter().unique_by(|p| p.symbol()).collect(),
        }
    }

    /// Case-insensitive lookup by base symbol (`btc`, `SOL`, ...).
    pub fn lookup(&self, symbol: &str) -> Result<NetworkProvider, GenerationError> {
        self.providers
            .iter()
            .copied()
            .find(|p| p.symbol().eq_ignore_ascii_case(symbol.trim()))
            .ok_or_else(|| GenerationError::UnknownNetwork(symbol.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = NetworkProvider> + '_ {
        self.providers.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
