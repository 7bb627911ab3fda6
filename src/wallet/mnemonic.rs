//! BIP-39 phrases and the seeds derived from them.

use bip39::Language;
use bip39::Mnemonic;
use bip39::MnemonicType;
use bip39::Seed;
use zeroize::Zeroizing;

use crate::network::GenerationError;

/// byte length of a BIP-39 seed
pub const SEED_LEN: usize = 64;

/// Number of words in a generated phrase.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumIter,
    clap::ValueEnum,
)]
pub enum WordCount {
    #[default]
    #[strum(to_string = "12")]
    #[value(name = "12")]
    Twelve,
    #[strum(to_string = "15")]
    #[value(name = "15")]
    Fifteen,
    #[strum(to_string = "18")]
    #[value(name = "18")]
    Eighteen,
    #[strum(to_string = "21")]
    #[value(name = "21")]
    TwentyOne,
    #[strum(to_string = "24")]
    #[value(name = "24")]
    TwentyFour,
}

impl WordCount {
    pub fn words(self) -> usize {
        match self {
            Self::Twelve => 12,
            Self::Fifteen => 15,
            Self::Eighteen => 18,
            Self::TwentyOne => 21,
            Self::TwentyFour => 24,
        }
    }

    fn mnemonic_type(self) -> MnemonicType {
        match self {
            Self::Twelve => MnemonicType::Words12,
            Self::Fifteen => MnemonicType::Words15,
            Self::Eighteen => MnemonicType::Words18,
            Self::TwentyOne => MnemonicType::Words21,
            Self::TwentyFour => MnemonicType::Words24,
        }
    }
}

/// Draw a fresh English phrase from the OS random source.
pub fn generate_mnemonic(word_count: WordCount) -> Zeroizing<String> {
    let mnemonic = Mnemonic::new(word_count.mnemonic_type(), Language::English);
    Zeroizing::new(mnemonic.phrase().to_string())
}

/// BIP-39 seed (PBKDF2-HMAC-SHA512, 2048 rounds) for `phrase` and the
/// optional `passphrase`.
///
/// The phrase checksum is verified first.
pub fn seed_from_mnemonic(
    phrase: &str,
    passphrase: &str,
) -> Result<Zeroizing<[u8; SEED_LEN]>, GenerationError> {
    let mnemonic = Mnemonic::from_phrase(phrase, Language::English)
        .map_err(|e| GenerationError::Mnemonic(e.to_string()))?;
    let seed = Seed::new(&mnemonic, passphrase);

    let mut bytes = Zeroizing::new([0u8; SEED_LEN]);
    bytes.copy_from_slice(seed.as_bytes());
    Ok(bytes)
}
