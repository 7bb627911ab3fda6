//! Cosmos SDK chains. One provider covers every chain that uses
//! secp256k1 keys and bech32 account addresses; the chain is picked by its
//! address prefix and SLIP-44 coin type.

use bech32::ToBase32;
use bech32::Variant;
use zeroize::Zeroizing;

use super::config::NetworkConfig;
use super::config::SYMBOL_KEY;
use super::derive::compressed;
use super::derive::hash160;
use super::derive::secp256k1_key;
use super::GenerationError;
use super::ProviderOutput;

pub const NAME: &str = "Cosmos Ecosystem (Universal)";
pub const SYMBOL: &str = "ATOM";

const PREFIX_KEY: &str = "prefix";
const COIN_TYPE_KEY: &str = "coin_type";

pub const DEFAULT_PREFIX: &str = "cosmos";
pub const DEFAULT_COIN_TYPE: u32 = 118;

/// Accepts `prefix` (letters only, stored lowercase) and `coin_type`.
///
/// A custom prefix also becomes the symbol, uppercased: `prefix=osmo` files
/// its vaults under `OSMO`.
pub fn configure(options: &[(String, String)]) -> Result<NetworkConfig, GenerationError> {
    let mut prefix = DEFAULT_PREFIX.to_string();
    let mut symbol = SYMBOL.to_string();
    let mut coin_type = DEFAULT_COIN_TYPE;

    for (key, value) in options {
        let value = value.trim();
        match key.as_str() {
            PREFIX_KEY => {
                if value.is_empty() || !value.chars().all(|c| c.is_ascii_alphabetic()) {
                    return Err(GenerationError::invalid_option(
                        PREFIX_KEY,
                        format!("`{value}` must be letters only"),
                    ));
                }
                prefix = value.to_ascii_lowercase();
                symbol = value.to_ascii_uppercase();
            }
            COIN_TYPE_KEY => {
                coin_type = value
                    .parse::<u32>()
                    .ok()
                    .filter(|c| *c < 0x8000_0000)
                    .ok_or_else(|| {
                        GenerationError::invalid_option(
                            COIN_TYPE_KEY,
                            format!("`{value}` is not a coin type"),
                        )
                    })?;
            }
            other => return Err(GenerationError::UnknownOption(other.to_string())),
        }
    }

    Ok(NetworkConfig::new()
        .with(PREFIX_KEY, prefix)
        .with(COIN_TYPE_KEY, coin_type)
        .with(SYMBOL_KEY, symbol))
}

pub fn generate(seed: &[u8], config: &NetworkConfig) -> Result<ProviderOutput, GenerationError> {
    let prefix = config.get_str(PREFIX_KEY).unwrap_or(DEFAULT_PREFIX);
    let coin_type = config.get_u32(COIN_TYPE_KEY).unwrap_or(DEFAULT_COIN_TYPE);
    let path = format!("m/44'/{coin_type}'/0'/0/0");

    let (secret, public_key) = secp256k1_key(seed, &path)?;
    let account = hash160(&compressed(&public_key));
    let address = bech32::encode(prefix, account.to_base32(), Variant::Bech32)
        .map_err(|e| GenerationError::derivation(&path, e))?;

    Ok(
        ProviderOutput::new(address, Zeroizing::new(hex::encode(*secret)))
            .with_extra("path", path)
            .with_extra("type", format!("Cosmos (ID: {coin_type})")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::mnemonic::seed_from_mnemonic;

    const ABANDON_ABOUT: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    fn option(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn cosmos_hub_reference_address() {
        let seed = seed_from_mnemonic(ABANDON_ABOUT, "").unwrap();
        let output = generate(&*seed, &configure(&[]).unwrap()).unwrap();

        assert_eq!(
            "cosmos19rl4cm2hmr8afy4kldpxz3fka4jguq0auqdal4",
            output.address
        );
        assert_eq!(64, output.private_key.len());
    }

    #[test]
    fn custom_prefix_changes_hrp_and_symbol() {
        let config = configure(&[option("prefix", "OSMO")]).unwrap();
        assert_eq!("OSMO", config.effective_symbol(SYMBOL));

        let seed = seed_from_mnemonic(ABANDON_ABOUT, "").unwrap();
        let output = generate(&*seed, &config).unwrap();
        assert!(output.address.starts_with("osmo1"));
    }

    #[test]
    fn coin_type_changes_path() {
        let config = configure(&[option("prefix", "kava"), option("coin_type", "459")]).unwrap();
        let seed = seed_from_mnemonic(ABANDON_ABOUT, "").unwrap();
        let output = generate(&*seed, &config).unwrap();

        let extra: Vec<String> = output
            .extra
            .iter()
            .map(|(_, v)| v.as_str().unwrap_or_default().to_string())
            .collect();
        assert_eq!(vec!["m/44'/459'/0'/0/0", "Cosmos (ID: 459)"], extra);
    }

    #[test]
    fn invalid_options_are_rejected() {
        for bad in [
            option("prefix", ""),
            option("prefix", "osmo1"),
            option("coin_type", "-1"),
            option("coin_type", "2147483648"),
        ] {
            assert!(matches!(
                configure(&[bad]),
                Err(GenerationError::InvalidOption { .. })
            ));
        }
        assert!(matches!(
            configure(&[option("mode", "NATIVE")]),
            Err(GenerationError::UnknownOption(_))
        ));
    }
}
