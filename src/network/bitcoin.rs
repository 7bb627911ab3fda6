//! Bitcoin mainnet addresses in the four common script formats.
//!
//! | mode    | standard | path             | address             |
//! |---------|----------|------------------|---------------------|
//! | NATIVE  | BIP-84   | m/84'/0'/0'/0/0  | P2WPKH, `bc1q...`   |
//! | TAPROOT | BIP-86   | m/86'/0'/0'/0/0  | P2TR, `bc1p...`     |
//! | LEGACY  | BIP-44   | m/44'/0'/0'/0/0  | P2PKH, `1...`       |
//! | NESTED  | BIP-49   | m/49'/0'/0'/0/0  | P2SH-P2WPKH, `3...` |

use std::str::FromStr;

use bech32::u5;
use bech32::ToBase32;
use bech32::Variant;
use k256::elliptic_curve::ff::PrimeField;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::AffinePoint;
use k256::ProjectivePoint;
use k256::Scalar;
use sha2::Digest;
use sha2::Sha256;
use zeroize::Zeroizing;

use super::config::NetworkConfig;
use super::config::SYMBOL_SUFFIX_KEY;
use super::derive::compressed;
use super::derive::hash160;
use super::derive::secp256k1_key;
use super::GenerationError;
use super::ProviderOutput;

pub const NAME: &str = "Bitcoin (Multi-Format)";
pub const SYMBOL: &str = "BTC";

const MODE_KEY: &str = "mode";
const HRP: &str = "bc";
const P2PKH_VERSION: u8 = 0x00;
const P2SH_VERSION: u8 = 0x05;
const WIF_VERSION: u8 = 0x80;

/// address format of a Bitcoin run
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum AddressMode {
    #[default]
    Native,
    Taproot,
    Legacy,
    Nested,
}

impl AddressMode {
    fn purpose(self) -> u32 {
        match self {
            Self::Native => 84,
            Self::Taproot => 86,
            Self::Legacy => 44,
            Self::Nested => 49,
        }
    }

    pub fn path(self) -> String {
        format!("m/{}'/0'/0'/0/0", self.purpose())
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Native => "Native (BIP-84)",
            Self::Taproot => "Taproot (BIP-86)",
            Self::Legacy => "Legacy (BIP-44)",
            Self::Nested => "Nested (BIP-49)",
        }
    }

    fn symbol_suffix(self) -> String {
        match self {
            Self::Native => String::new(),
            other => format!("_{other}"),
        }
    }
}

/// Accepts `mode` (NATIVE, TAPROOT, LEGACY or NESTED, any case).
pub fn configure(options: &[(String, String)]) -> Result<NetworkConfig, GenerationError> {
    let mut mode = AddressMode::default();
    for (key, value) in options {
        match key.as_str() {
            MODE_KEY => {
                mode = AddressMode::from_str(value.trim()).map_err(|_| {
                    GenerationError::invalid_option(
                        MODE_KEY,
                        format!("`{value}` is not one of NATIVE, TAPROOT, LEGACY, NESTED"),
                    )
                })?;
            }
            other => return Err(GenerationError::UnknownOption(other.to_string())),
        }
    }

    Ok(NetworkConfig::new()
        .with(MODE_KEY, mode.to_string())
        .with(SYMBOL_SUFFIX_KEY, mode.symbol_suffix()))
}

/// A missing `mode` means NATIVE.
pub fn generate(seed: &[u8], config: &NetworkConfig) -> Result<ProviderOutput, GenerationError> {
    let mode = match config.get_str(MODE_KEY) {
        Some(mode) => AddressMode::from_str(mode)
            .map_err(|_| GenerationError::invalid_option(MODE_KEY, mode))?,
        None => AddressMode::default(),
    };
    let path = mode.path();
    let (secret, public_key) = secp256k1_key(seed, &path)?;
    let public_key = compressed(&public_key);

    let address = match mode {
        AddressMode::Native => segwit_address(0, &hash160(&public_key), Variant::Bech32),
        AddressMode::Taproot => {
            let output_key = taproot_output_key(&public_key)
                .ok_or_else(|| GenerationError::derivation(&path, "taproot tweak out of range"))?;
            segwit_address(1, &output_key, Variant::Bech32m)
        }
        AddressMode::Legacy => Ok(base58check(P2PKH_VERSION, &hash160(&public_key))),
        AddressMode::Nested => {
            let mut redeem_script = vec![0x00, 0x14];
            redeem_script.extend_from_slice(&hash160(&public_key));
            Ok(base58check(P2SH_VERSION, &hash160(&redeem_script)))
        }
    }
    .map_err(|e| GenerationError::derivation(&path, e))?;

    Ok(ProviderOutput::new(address, wif(&secret))
        .with_extra("type", mode.description())
        .with_extra("path", path))
}

fn segwit_address(
    version: u8,
    program: &[u8],
    variant: Variant,
) -> Result<String, bech32::Error> {
    let mut data = vec![u5::try_from_u8(version)?];
    data.extend(program.to_base32());
    bech32::encode(HRP, data, variant)
}

fn base58check(version: u8, payload: &[u8]) -> String {
    bs58::encode(payload)
        .with_check_version(version)
        .into_string()
}

/// compressed-key mainnet WIF
fn wif(secret: &[u8; 32]) -> Zeroizing<String> {
    let mut payload = Zeroizing::new(Vec::with_capacity(33));
    payload.extend_from_slice(secret);
    payload.push(0x01);
    Zeroizing::new(base58check(WIF_VERSION, &payload))
}

/// BIP-341 output key x-coordinate for a key-path-only spend:
/// `Q = lift_x(P) + int(tagged_hash("TapTweak", P.x)) * G`
fn taproot_output_key(internal_key: &[u8; 33]) -> Option<[u8; 32]> {
    let x_only = &internal_key[1..];

    let mut even = [0u8; 33];
    even[0] = 0x02;
    even[1..].copy_from_slice(x_only);
    let internal = k256::PublicKey::from_sec1_bytes(&even).ok()?;

    let tag = Sha256::digest(b"TapTweak");
    let tweak = Sha256::new()
        .chain_update(tag)
        .chain_update(tag)
        .chain_update(x_only)
        .finalize();
    let tweak = Option::<Scalar>::from(Scalar::from_repr(tweak))?;

    let output = internal.to_projective() + ProjectivePoint::GENERATOR * tweak;
    let output = AffinePoint::from(output).to_encoded_point(true);

    let mut x = [0u8; 32];
    x.copy_from_slice(output.x()?);
    Some(x)
}
