use std::path::PathBuf;

use clap::builder::RangedI64ValueParser;
use clap::Parser;
use clap::Subcommand;

use crate::wallet::export::DEFAULT_PREVIEW_ROWS;
use crate::wallet::WordCount;

/// Command-line arguments
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about)]
pub struct Args {
    /// Directory holding `wallets_encrypted/` and `wallets_decrypted/`.
    ///
    /// Defaults to the platform data directory.
    #[clap(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Command,
}

/// The CLI Command
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Generate a batch of wallets and save it as an encrypted vault.
    Generate {
        /// network symbol, e.g. BTC, ATOM, SOL, SUI, DOT
        #[clap(long, short)]
        network: String,

        /// number of wallets to generate
        #[clap(long, short, default_value = "10", value_parser(RangedI64ValueParser::<usize>::new().range(1..=1_000_000)))]
        count: usize,

        /// mnemonic length in words
        #[clap(long, value_enum, default_value_t)]
        words: WordCount,

        /// BIP-39 passphrase applied to every seed.
        ///
        /// Falls back to the CHAINVAULT_PASSPHRASE environment variable, then
        /// to no passphrase. A value given here shows up in the process list.
        #[clap(long)]
        passphrase: Option<String>,

        /// Network option as key=value, repeatable.
        ///
        /// E.g. --option mode=TAPROOT, or --option prefix=osmo --option coin_type=118
        #[clap(long = "option", short = 'o', value_name = "KEY=VALUE", value_parser = parse_key_value)]
        options: Vec<(String, String)>,

        /// label added to the vault file name
        #[clap(long)]
        tag: Option<String>,

        #[clap(flatten)]
        password: PasswordArgs,
    },

    /// Decrypt a vault, then preview it or export it as CSV.
    Decrypt {
        /// vault file; bare names are looked up in the encrypted directory
        file: PathBuf,

        /// write `decrypted_<name>.csv` instead of printing a preview
        #[clap(long)]
        csv: bool,

        /// rows shown in the preview
        #[clap(long, default_value_t = DEFAULT_PREVIEW_ROWS)]
        limit: usize,

        #[clap(flatten)]
        password: PasswordArgs,
    },

    /// List vault files in the encrypted directory.
    List,

    /// List supported networks and their options.
    Networks,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct PasswordArgs {
    /// Vault password. Visible to other local users; prefer the environment
    /// variable or the prompt.
    #[clap(long)]
    pub password: Option<String>,

    /// fail instead of prompting when no password is given
    #[clap(long)]
    pub non_interactive: bool,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("`{raw}` is not of the form key=value"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("`{raw}` has an empty key"));
    }
    Ok((key.to_ascii_lowercase(), value.trim().to_string()))
}

#[cfg(test)]
mod cli_args_tests {
    use super::*;

    #[test]
    fn generate_defaults() {
        let args = Args::parse_from(["chainvault", "generate", "--network", "sol"]);

        let Command::Generate {
            network,
            count,
            words,
            passphrase,
            options,
            tag,
            password,
        } = args.command
        else {
            panic!("expected generate");
        };
        assert_eq!("sol", network);
        assert_eq!(10, count);
        assert_eq!(WordCount::Twelve, words);
        assert_eq!(None, passphrase);
        assert!(options.is_empty());
        assert_eq!(None, tag);
        assert_eq!(None, password.password);
        assert!(!password.non_interactive);
        assert_eq!(None, args.data_dir);
    }

    #[test]
    fn generate_with_options() {
        let args = Args::parse_from([
            "chainvault",
            "--data-dir",
            "/tmp/cv",
            "generate",
            "-n",
            "ATOM",
            "-c",
            "3",
            "--words",
            "24",
            "-o",
            "prefix=osmo",
            "--option",
            "Coin_Type = 118",
            "--tag",
            "cold",
            "--passphrase",
            "TREZOR",
            "--password",
            "pw",
            "--non-interactive",
        ]);

        assert_eq!(Some(PathBuf::from("/tmp/cv")), args.data_dir);
        let Command::Generate {
            count,
            words,
            passphrase,
            options,
            tag,
            password,
            ..
        } = args.command
        else {
            panic!("expected generate");
        };
        assert_eq!(Some("TREZOR".to_string()), passphrase);
        assert_eq!(3, count);
        assert_eq!(WordCount::TwentyFour, words);
        assert_eq!(
            vec![
                ("prefix".to_string(), "osmo".to_string()),
                ("coin_type".to_string(), "118".to_string())
            ],
            options
        );
        assert_eq!(Some("cold".to_string()), tag);
        assert_eq!(Some("pw".to_string()), password.password);
        assert!(password.non_interactive);
    }

    #[test]
    fn data_dir_is_global() {
        let args = Args::parse_from(["chainvault", "list", "--data-dir", "/tmp/cv"]);
        assert_eq!(Some(PathBuf::from("/tmp/cv")), args.data_dir);
    }

    #[test]
    fn decrypt_defaults() {
        let args = Args::parse_from(["chainvault", "decrypt", "wallets_SOL.enc"]);
        let Command::Decrypt {
            file, csv, limit, ..
        } = args.command
        else {
            panic!("expected decrypt");
        };
        assert_eq!(PathBuf::from("wallets_SOL.enc"), file);
        assert!(!csv);
        assert_eq!(20, limit);
    }

    #[test]
    fn rejects_bad_input() {
        for argv in [
            vec!["chainvault", "generate", "-n", "BTC", "-c", "0"],
            vec!["chainvault", "generate", "-n", "BTC", "--words", "13"],
            vec!["chainvault", "generate", "-n", "BTC", "-o", "mode"],
            vec!["chainvault", "generate", "-n", "BTC", "-o", "=x"],
            vec!["chainvault", "generate"],
        ] {
            assert!(Args::try_parse_from(&argv).is_err(), "{argv:?}");
        }
    }
}
