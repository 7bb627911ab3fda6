//! Substrate chains: sr25519 keys and SS58 addresses.
//!
//! Keys are derived from the mnemonic's entropy (`substrate-bip39`), not from
//! the BIP-39 seed, so a phrase imported into polkadot.js or Talisman shows
//! the same account. The BIP-39 passphrase is not applied here.

use bip39::Language;
use bip39::Mnemonic;
use blake2::Blake2b512;
use blake2::Digest;
use schnorrkel::ExpansionMode;
use zeroize::Zeroizing;

use super::config::NetworkConfig;
use super::config::SYMBOL_KEY;
use super::GenerationError;
use super::ProviderOutput;

pub const NAME: &str = "Polkadot Ecosystem (Universal)";
pub const SYMBOL: &str = "DOT";

const PREFIX_KEY: &str = "prefix";
const NETWORK_NAME_KEY: &str = "network_name";

pub const DEFAULT_PREFIX: u16 = 0;
pub const DEFAULT_NETWORK_NAME: &str = "Polkadot";

/// largest prefix SS58 can encode (14 bits)
pub const MAX_PREFIX: u16 = 16_383;

const SS58_CHECKSUM_PREIMAGE: &[u8] = b"SS58PRE";
const SS58_CHECKSUM_LEN: usize = 2;

/// stands in for the derivation path, which sr25519 root keys don't have
const KEY_SOURCE: &str = "mnemonic";

/// Accepts `prefix` (SS58 network id), `network_name` and `symbol`.
///
/// A custom network name also sets the symbol to its first four characters,
/// uppercased, unless `symbol` is given too.
pub fn configure(options: &[(String, String)]) -> Result<NetworkConfig, GenerationError> {
    let mut prefix = DEFAULT_PREFIX;
    let mut network_name = DEFAULT_NETWORK_NAME.to_string();
    let mut symbol: Option<String> = None;

    for (key, value) in options {
        let value = value.trim();
        match key.as_str() {
            PREFIX_KEY => {
                prefix = value
                    .parse::<u16>()
                    .ok()
                    .filter(|p| *p <= MAX_PREFIX)
                    .ok_or_else(|| {
                        GenerationError::invalid_option(
                            PREFIX_KEY,
                            format!("`{value}` is not an SS58 prefix (0..={MAX_PREFIX})"),
                        )
                    })?;
            }
            NETWORK_NAME_KEY => {
                if value.is_empty() {
                    return Err(GenerationError::invalid_option(
                        NETWORK_NAME_KEY,
                        "must not be empty",
                    ));
                }
                network_name = value.to_string();
            }
            SYMBOL_KEY => {
                if value.is_empty() || !value.chars().all(|c| c.is_ascii_alphanumeric()) {
                    return Err(GenerationError::invalid_option(
                        SYMBOL_KEY,
                        format!("`{value}` must be letters and digits only"),
                    ));
                }
                symbol = Some(value.to_ascii_uppercase());
            }
            other => return Err(GenerationError::UnknownOption(other.to_string())),
        }
    }

    let symbol = symbol.unwrap_or_else(|| {
        if network_name == DEFAULT_NETWORK_NAME {
            SYMBOL.to_string()
        } else {
            symbol_from_name(&network_name)
        }
    });

    Ok(NetworkConfig::new()
        .with(PREFIX_KEY, prefix)
        .with(NETWORK_NAME_KEY, network_name)
        .with(SYMBOL_KEY, symbol))
}

fn symbol_from_name(name: &str) -> String {
    let symbol: String = name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(4)
        .collect::<String>()
        .to_ascii_uppercase();
    if symbol.is_empty() {
        SYMBOL.to_string()
    } else {
        symbol
    }
}

/// Root sr25519 account of `mnemonic`, encoded for the configured prefix.
pub fn generate(mnemonic: &str, config: &NetworkConfig) -> Result<ProviderOutput, GenerationError> {
    let prefix = match config.get_u32(PREFIX_KEY) {
        Some(p) => u16::try_from(p)
            .ok()
            .filter(|p| *p <= MAX_PREFIX)
            .ok_or_else(|| GenerationError::invalid_option(PREFIX_KEY, p.to_string()))?,
        None => DEFAULT_PREFIX,
    };
    let network_name = config
        .get_str(NETWORK_NAME_KEY)
        .unwrap_or(DEFAULT_NETWORK_NAME);

    let phrase = Mnemonic::from_phrase(mnemonic, Language::English)
        .map_err(|e| GenerationError::Mnemonic(e.to_string()))?;
    let mini_secret = substrate_bip39::mini_secret_from_entropy(phrase.entropy(), "")
        .map_err(|e| GenerationError::derivation(KEY_SOURCE, format!("{e:?}")))?;
    let keypair = mini_secret.expand_to_keypair(ExpansionMode::Ed25519);

    let public_key = keypair.public.to_bytes();
    let secret = Zeroizing::new(keypair.secret.to_bytes());

    Ok(
        ProviderOutput::new(
            ss58_encode(prefix, &public_key),
            Zeroizing::new(hex::encode(secret.as_slice())),
        )
        .with_extra("public_key", hex::encode(public_key))
        .with_extra("ss58_prefix", prefix)
        .with_extra("type", format!("{network_name} (Sr25519 / Mnemonic)")),
    )
}

/// SS58 address: base58 of `prefix || public key || checksum`, where the
/// checksum is the first two bytes of BLAKE2b-512("SS58PRE" || prefix || key).
///
/// Prefixes below 64 take one byte, larger ones two. `prefix` must not exceed
/// [`MAX_PREFIX`].
pub fn ss58_encode(prefix: u16, public_key: &[u8; 32]) -> String {
    let ident = prefix & MAX_PREFIX;
    let mut data = match ident {
        0..=63 => vec![ident as u8],
        _ => {
            let first = ((ident & 0b0000_0000_1111_1100) as u8) >> 2;
            let second = ((ident >> 8) as u8) | (((ident & 0b0000_0000_0000_0011) as u8) << 6);
            vec![first | 0b0100_0000, second]
        }
    };
    data.extend_from_slice(public_key);

    let checksum = Blake2b512::new()
        .chain_update(SS58_CHECKSUM_PREIMAGE)
        .chain_update(&data)
        .finalize();
    data.extend_from_slice(&checksum[..SS58_CHECKSUM_LEN]);

    bs58::encode(data).into_string()
}
