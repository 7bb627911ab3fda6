//! Batch orchestration: N fresh mnemonics through one provider.

use tracing::debug;
use tracing::info;
use tracing::warn;
use zeroize::Zeroizing;

use crate::network::GenerationError;
use crate::network::NetworkConfig;
use crate::network::NetworkProvider;
use crate::wallet::mnemonic::generate_mnemonic;
use crate::wallet::mnemonic::seed_from_mnemonic;
use crate::wallet::WalletBatch;
use crate::wallet::WalletRecord;
use crate::wallet::WordCount;

/// Parameters of one generation run that are independent of the network.
#[derive(Clone, PartialEq, Eq)]
pub struct GenerationSettings {
    pub count: usize,
    pub word_count: WordCount,

    /// BIP-39 passphrase applied to every seed of the run, stored in each
    /// record
    pub passphrase: Zeroizing<String>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            count: 10,
            word_count: WordCount::default(),
            passphrase: Zeroizing::new(String::new()),
        }
    }
}

impl std::fmt::Debug for GenerationSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationSettings")
            .field("count", &self.count)
            .field("word_count", &self.word_count)
            .field("passphrase", &"[REDACTED]")
            .finish()
    }
}

/// Result of a run that produced at least one wallet.
#[derive(Debug)]
pub struct GeneratedBatch {
    /// symbol written into every record and used for the vault file name
    pub symbol: String,
    pub batch: WalletBatch,
    pub skipped: usize,
}

/// Drives one provider with a fixed config.
#[derive(Debug, Clone)]
pub struct BatchGenerator {
    provider: NetworkProvider,
    config: NetworkConfig,
}

impl BatchGenerator {
    pub fn new(provider: NetworkProvider, config: NetworkConfig) -> Self {
        Self { provider, config }
    }

    /// symbol records of this run carry: config override, then suffix
    pub fn symbol(&self) -> String {
        self.config.effective_symbol(self.provider.symbol())
    }

    /// Generate `settings.count` wallets, each from its own fresh mnemonic.
    ///
    /// A failed wallet is logged and skipped. The run fails only if `count`
    /// is zero or every attempt failed.
    pub fn generate(&self, settings: &GenerationSettings) -> Result<GeneratedBatch, GenerationError> {
        let symbol = self.symbol();
        info!(
            "generating {} {} wallets ({} words)",
            settings.count, symbol, settings.word_count
        );

        let (batch, skipped) = collect_batch(settings.count, |_| {
            let mnemonic = generate_mnemonic(settings.word_count);
            let seed = seed_from_mnemonic(&mnemonic, &settings.passphrase)?;
            let output = self.provider.generate(&*seed, &self.config, &mnemonic)?;

            let mut record = WalletRecord::new(
                symbol.as_str(),
                output.address.as_str(),
                output.private_key.as_str(),
                mnemonic.as_str(),
                settings.passphrase.as_str(),
            );
            for (key, value) in &output.extra {
                if !record.merge_extra(key.as_str(), value.clone()) {
                    debug!("dropped provider field `{}`", key);
                }
            }
            Ok(record)
        })?;

        info!("generated {} {} wallets", batch.len(), symbol);
        Ok(GeneratedBatch {
            symbol,
            batch,
            skipped,
        })
    }
}

fn collect_batch(
    count: usize,
    mut make_record: impl FnMut(usize) -> Result<WalletRecord, GenerationError>,
) -> Result<(WalletBatch, usize), GenerationError> {
    if count == 0 {
        return Err(GenerationError::ZeroCount);
    }

    let mut batch = WalletBatch::new();
    let mut skipped = 0;
    for index in 0..count {
        match make_record(index) {
            Ok(record) => batch.push(record),
            Err(e) => {
                warn!("skipping wallet {}: {}", index, e);
                skipped += 1;
            }
        }
    }

    if batch.is_empty() {
        return Err(GenerationError::EmptyBatch { attempted: count });
    }
    if skipped > 0 {
        warn!("{} of {} wallets failed and were skipped", skipped, count);
    }
    Ok((batch, skipped))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use tracing_test::traced_test;

    use super::*;

    fn options(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn settings(count: usize) -> GenerationSettings {
        GenerationSettings {
            count,
            ..GenerationSettings::default()
        }
    }

    #[test]
    fn generates_requested_count_with_distinct_mnemonics() {
        let config = NetworkProvider::Solana.configure(&[]).unwrap();
        let generated = BatchGenerator::new(NetworkProvider::Solana, config)
            .generate(&settings(5))
            .unwrap();

        assert_eq!("SOL", generated.symbol);
        assert_eq!(5, generated.batch.len());
        assert_eq!(0, generated.skipped);

        let phrases: HashSet<&str> = generated.batch.iter().map(|r| r.mnemonic.as_str()).collect();
        assert_eq!(5, phrases.len());
    }

    #[test]
    fn records_use_effective_symbol_and_keep_extras_after_core() {
        let config = NetworkProvider::Bitcoin
            .configure(&options(&[("mode", "taproot")]))
            .unwrap();
        let generated = BatchGenerator::new(NetworkProvider::Bitcoin, config)
            .generate(&settings(1))
            .unwrap();

        let record = generated.batch.first().unwrap();
        assert_eq!("BTC_TAPROOT", generated.symbol);
        assert_eq!("BTC_TAPROOT", record.network);
        assert!(record.address.starts_with("bc1p"));
        assert_eq!(
            vec![
                "network",
                "address",
                "private_key",
                "mnemonic",
                "passphrase",
                "type",
                "path"
            ],
            record.keys().collect::<Vec<_>>()
        );
    }

    #[test]
    fn custom_cosmos_prefix_names_the_batch() {
        let config = NetworkProvider::Cosmos
            .configure(&options(&[("prefix", "celestia")]))
            .unwrap();
        let generated = BatchGenerator::new(NetworkProvider::Cosmos, config)
            .generate(&settings(2))
            .unwrap();

        assert_eq!("CELESTIA", generated.symbol);
        assert!(generated
            .batch
            .iter()
            .all(|r| r.address.starts_with("celestia1")));
    }

    #[test]
    fn passphrase_and_word_count_are_recorded() {
        let settings = GenerationSettings {
            count: 1,
            word_count: WordCount::TwentyFour,
            passphrase: Zeroizing::new("extra words".to_string()),
        };
        let generated = BatchGenerator::new(NetworkProvider::Sui, NetworkConfig::new())
            .generate(&settings)
            .unwrap();

        let record = generated.batch.first().unwrap();
        assert_eq!("extra words", record.passphrase);
        assert_eq!(24, record.mnemonic.split_whitespace().count());
    }

    #[test]
    fn zero_count_is_rejected() {
        let generator = BatchGenerator::new(NetworkProvider::Sui, NetworkConfig::new());
        assert_eq!(
            GenerationError::ZeroCount,
            generator.generate(&settings(0)).unwrap_err()
        );
    }

    #[traced_test]
    #[test]
    fn failed_records_are_skipped() {
        let (batch, skipped) = collect_batch(6, |i| {
            if i % 2 == 0 {
                Err(GenerationError::derivation("m/0'", "boom"))
            } else {
                Ok(WalletRecord::new("SOL", format!("addr{i}"), "k", "m", ""))
            }
        })
        .unwrap();

        assert_eq!(3, batch.len());
        assert_eq!(3, skipped);
        assert_eq!("addr1", batch.first().unwrap().address);
        assert!(logs_contain("skipping wallet 0"));
    }

    #[test]
    fn all_failures_escalate() {
        let result = collect_batch(3, |_| Err(GenerationError::Mnemonic("bad".into())));
        assert_eq!(
            GenerationError::EmptyBatch { attempted: 3 },
            result.unwrap_err()
        );
    }
}
