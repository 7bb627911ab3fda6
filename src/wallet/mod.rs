//! Generated wallets and the files they live in.

pub mod export;
pub mod mnemonic;
pub mod record;
pub mod vault_file;

pub use mnemonic::WordCount;
pub use record::WalletBatch;
pub use record::WalletRecord;
