use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use ed25519_dalek::SigningKey;
use zeroize::Zeroizing;

use super::config::NetworkConfig;
use super::derive::ed25519_key;
use super::GenerationError;
use super::ProviderOutput;

pub const NAME: &str = "Solana (SOL)";
pub const SYMBOL: &str = "SOL";

/// account path used by Phantom and the Solana CLI
pub const PATH: &str = "m/44'/501'/0'/0'";

/// Address is the base58 public key; the private key is the base64 of the
/// raw 32-byte ed25519 secret.
pub fn generate(seed: &[u8], _config: &NetworkConfig) -> Result<ProviderOutput, GenerationError> {
    let secret = ed25519_key(seed, PATH)?;
    let signing_key = SigningKey::from_bytes(&secret);
    let address = bs58::encode(signing_key.verifying_key().as_bytes()).into_string();

    Ok(
        ProviderOutput::new(address, Zeroizing::new(STANDARD.encode(*secret)))
            .with_extra("path", PATH),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::mnemonic::seed_from_mnemonic;

    const ABANDON_ABOUT: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn address_is_base58_public_key() {
        let seed = seed_from_mnemonic(ABANDON_ABOUT, "").unwrap();
        let output = generate(&*seed, &NetworkConfig::new()).unwrap();

        let decoded = bs58::decode(&output.address).into_vec().unwrap();
        assert_eq!(32, decoded.len());
        assert_eq!(output, generate(&*seed, &NetworkConfig::new()).unwrap());
    }

    #[test]
    fn private_key_is_base64_of_32_bytes() {
        let seed = seed_from_mnemonic(ABANDON_ABOUT, "").unwrap();
        let output = generate(&*seed, &NetworkConfig::new()).unwrap();

        let raw = STANDARD.decode(output.private_key.as_bytes()).unwrap();
        assert_eq!(32, raw.len());

        let signing_key = SigningKey::from_bytes(&raw.try_into().unwrap());
        assert_eq!(
            output.address,
            bs58::encode(signing_key.verifying_key().as_bytes()).into_string()
        );
    }
}
