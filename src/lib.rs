//! Multi-chain wallet generator with password-encrypted vault files.
//!
//! - [`network`] derives addresses and keys per chain family.
//! - [`generator`] runs a provider over fresh mnemonics.
//! - [`vault`] seals a batch with scrypt + AES-256-GCM.
//! - [`wallet`] holds the record types and file handling.

pub mod commands;
pub mod config_models;
pub mod generator;
pub mod network;
pub mod vault;
pub mod wallet;

use anyhow::Result;
use config_models::cli_args;
use config_models::cli_args::Command;
use config_models::cli_args::PasswordArgs;
use config_models::data_directory::DataDirectory;
use generator::GenerationSettings;
use itertools::Itertools;
use network::NetworkRegistry;
use tracing::info;
use vault::PasswordSource;
use wallet::export::BatchPreview;
use wallet::export::FirstWalletPreview;

/// Entry point of the binary after logging is set up.
pub fn run(args: cli_args::Args) -> Result<()> {
    let data_dir = DataDirectory::get(args.data_dir.clone())?;
    let registry = NetworkRegistry::with_defaults();
    info!("data directory is {}", data_dir);

    match args.command {
        Command::Generate {
            network,
            count,
            words,
            passphrase,
            options,
            tag,
            password,
        } => {
            let password = password_source(&password).new_password()?;
            let request = commands::GenerateRequest {
                network: &network,
                options: &options,
                settings: GenerationSettings {
                    count,
                    word_count: words,
                    passphrase: vault::password::bip39_passphrase(passphrase.as_deref()),
                },
                tag: tag.as_deref(),
            };
            let saved = commands::generate_vault(&data_dir, &registry, &request, &password)?;

            print!("{}", FirstWalletPreview(&saved.batch));
            if saved.skipped > 0 {
                println!("{} wallets failed and were skipped.", saved.skipped);
            }
            println!("Saved {} wallets.", saved.batch.len());
            println!("Path: {}", saved.path.display());
        }
        Command::Decrypt {
            file,
            csv,
            limit,
            password,
        } => {
            let path = data_dir.resolve_vault_path(&file);
            let password = password_source(&password).unlock_password()?;
            let batch = commands::open_vault(&path, &password)?;

            if csv {
                let csv_path = commands::export_csv(&data_dir, &path, &batch)?;
                println!("Saved: {}", csv_path.display());
            } else {
                print!("{}", BatchPreview::new(&batch, limit));
            }
        }
        Command::List => {
            let vaults = commands::list_vaults(&data_dir)?;
            if vaults.is_empty() {
                println!("No vault files in {}", data_dir.encrypted_dir_path().display());
            }
            for path in vaults {
                println!("{}", path.display());
            }
        }
        Command::Networks => {
            for provider in registry.iter() {
                let keys = provider.option_keys();
                if keys.is_empty() {
                    println!("{:<6} {}", provider.symbol(), provider.name());
                } else {
                    println!(
                        "{:<6} {} (options: {})",
                        provider.symbol(),
                        provider.name(),
                        keys.iter().join(", ")
                    );
                }
            }
        }
    }

    Ok(())
}

fn password_source(args: &PasswordArgs) -> PasswordSource<'_> {
    PasswordSource {
        cli_password: args.password.as_deref(),
        allow_interactive: !args.non_interactive,
    }
}
