use blake2::digest::consts::U32;
use blake2::Blake2b;
use blake2::Digest;
use ed25519_dalek::SigningKey;
use zeroize::Zeroizing;

use super::config::NetworkConfig;
use super::derive::ed25519_key;
use super::GenerationError;
use super::ProviderOutput;

pub const NAME: &str = "SUI Network";
pub const SYMBOL: &str = "SUI";

pub const PATH: &str = "m/44'/784'/0'/0'/0'";

/// signature scheme flag prefixed to the public key before hashing
const ED25519_FLAG: u8 = 0x00;

type Blake2b256 = Blake2b<U32>;

/// Address is `0x` + hex(BLAKE2b-256(flag || public key)); the private key is
/// the raw secret in hex.
pub fn generate(seed: &[u8], _config: &NetworkConfig) -> Result<ProviderOutput, GenerationError> {
    let secret = ed25519_key(seed, PATH)?;
    let public_key = SigningKey::from_bytes(&secret).verifying_key();

    let digest = Blake2b256::new()
        .chain_update([ED25519_FLAG])
        .chain_update(public_key.as_bytes())
        .finalize();
    let address = format!("0x{}", hex::encode(digest));

    Ok(
        ProviderOutput::new(address, Zeroizing::new(hex::encode(*secret)))
            .with_extra("path", PATH),
    )
}
