//! Vault password input.
//!
//! Passwords come from a CLI flag, an environment variable, or an interactive
//! prompt, in that order. Strength is reported for new vaults but not
//! enforced.
//!
//! The BIP-39 passphrase used during generation is resolved the same way,
//! without the prompt.

use anyhow::anyhow;
use anyhow::bail;
use anyhow::Result;
use tracing::info;
use tracing::warn;
use zeroize::Zeroizing;

/// environment variable consulted when no `--password` flag is given
pub const VAULT_PASSWORD_ENV_VAR: &str = "CHAINVAULT_PASSWORD";

/// environment variable consulted when no `--passphrase` flag is given
pub const BIP39_PASSPHRASE_ENV_VAR: &str = "CHAINVAULT_PASSPHRASE";

/// coarse password strength classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, strum::Display)]
pub enum PasswordStrength {
    #[strum(to_string = "very weak")]
    VeryWeak,
    #[strum(to_string = "weak")]
    Weak,
    #[strum(to_string = "moderate")]
    Moderate,
    #[strum(to_string = "strong")]
    Strong,
}

impl PasswordStrength {
    const LEVELS: [Self; 4] = [Self::VeryWeak, Self::Weak, Self::Moderate, Self::Strong];

    /// Classify `password` by length, then downgrade by the number of
    /// character classes used (lower, upper, digit, symbol): two levels for
    /// one class or none, one level for two classes.
    pub fn of(password: &str) -> Self {
        let by_length = match password.chars().count() {
            0..=7 => Self::VeryWeak,
            8..=11 => Self::Weak,
            12..=15 => Self::Moderate,
            _ => Self::Strong,
        };

        let classes = [
            password.chars().any(char::is_lowercase),
            password.chars().any(char::is_uppercase),
            password.chars().any(|c| c.is_ascii_digit()),
            password
                .chars()
                .any(|c| !c.is_alphanumeric() && !c.is_whitespace()),
        ]
        .into_iter()
        .filter(|present| *present)
        .count();

        let penalty = match classes {
            0 | 1 => 2,
            2 => 1,
            _ => 0,
        };
        Self::LEVELS[(by_length as usize).saturating_sub(penalty)]
    }
}

/// Where the password for a vault operation comes from
#[derive(Debug, Clone, Copy)]
pub struct PasswordSource<'a> {
    pub cli_password: Option<&'a str>,
    pub allow_interactive: bool,
}

impl PasswordSource<'_> {
    /// Password for opening an existing vault
    pub fn unlock_password(&self) -> Result<Zeroizing<String>> {
        if let Some(password) = self.non_interactive()? {
            return Ok(password);
        }
        let password = Zeroizing::new(rpassword::prompt_password("Vault password: ")?);
        Ok(password)
    }

    /// Password for a new vault. Prompted passwords are entered twice.
    pub fn new_password(&self) -> Result<Zeroizing<String>> {
        let password = match self.non_interactive()? {
            Some(password) => password,
            None => prompt_new_password()?,
        };

        if password.is_empty() {
            bail!("vault password must not be empty");
        }

        let strength = PasswordStrength::of(&password);
        if strength < PasswordStrength::Moderate {
            warn!("vault password strength is {}", strength);
        }
        Ok(password)
    }

    fn non_interactive(&self) -> Result<Option<Zeroizing<String>>> {
        if let Some(password) = self.cli_password {
            warn!("using vault password from the command line; it is visible in the process list");
            return Ok(Some(Zeroizing::new(password.to_string())));
        }

        if let Ok(password) = std::env::var(VAULT_PASSWORD_ENV_VAR) {
            warn!(
                "using vault password from environment variable {}",
                VAULT_PASSWORD_ENV_VAR
            );
            return Ok(Some(Zeroizing::new(password)));
        }

        if !self.allow_interactive {
            return Err(anyhow!(
                "no vault password available: pass --password or set {}",
                VAULT_PASSWORD_ENV_VAR
            ));
        }
        Ok(None)
    }
}

/// BIP-39 passphrase for a generation run: the CLI flag, then
/// [`BIP39_PASSPHRASE_ENV_VAR`], then empty.
pub fn bip39_passphrase(cli_passphrase: Option<&str>) -> Zeroizing<String> {
    if let Some(passphrase) = cli_passphrase {
        warn!("using BIP-39 passphrase from the command line; it is visible in the process list");
        return Zeroizing::new(passphrase.to_string());
    }

    match std::env::var(BIP39_PASSPHRASE_ENV_VAR) {
        Ok(passphrase) => {
            info!(
                "using BIP-39 passphrase from environment variable {}",
                BIP39_PASSPHRASE_ENV_VAR
            );
            Zeroizing::new(passphrase)
        }
        Err(_) => Zeroizing::new(String::new()),
    }
}

fn prompt_new_password() -> Result<Zeroizing<String>> {
    loop {
        let password = Zeroizing::new(rpassword::prompt_password("New vault password: ")?);
        if password.is_empty() {
            eprintln!("Password must not be empty.");
            continue;
        }
        eprintln!("Password strength: {}", PasswordStrength::of(&password));

        let confirm = Zeroizing::new(rpassword::prompt_password("Repeat vault password: ")?);
        if *password != *confirm {
            eprintln!("Passwords do not match.");
            continue;
        }
        return Ok(password);
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;

    #[test]
    fn strength_by_length() {
        assert_eq!(PasswordStrength::VeryWeak, PasswordStrength::of("Ab1!"));
        assert_eq!(PasswordStrength::Weak, PasswordStrength::of("Abcdef1!"));
        assert_eq!(PasswordStrength::Moderate, PasswordStrength::of("Abcdefgh12!?"));
        assert_eq!(PasswordStrength::Strong, PasswordStrength::of("Abcdefghijkl123!"));
    }

    #[test]
    fn strength_penalises_single_class() {
        // 16 lowercase letters: one class, two levels down
        assert_eq!(
            PasswordStrength::Weak,
            PasswordStrength::of("abcdefghijklmnop")
        );
        // two classes, one level down
        assert_eq!(
            PasswordStrength::Moderate,
            PasswordStrength::of("Abcdefghijklmnop")
        );
        // three classes, no penalty
        assert_eq!(
            PasswordStrength::Strong,
            PasswordStrength::of("Abcdefghijklmno1")
        );
    }

    #[test]
    fn empty_password_is_very_weak() {
        assert_eq!(PasswordStrength::VeryWeak, PasswordStrength::of(""));
    }

    #[test]
    fn cli_password_wins() {
        let source = PasswordSource {
            cli_password: Some("correct horse"),
            allow_interactive: false,
        };
        assert_eq!("correct horse", source.unlock_password().unwrap().as_str());
        assert_eq!("correct horse", source.new_password().unwrap().as_str());
    }

    #[test]
    fn empty_cli_password_rejected_for_new_vault() {
        let source = PasswordSource {
            cli_password: Some(""),
            allow_interactive: false,
        };
        assert!(source.new_password().is_err());
    }

    #[traced_test]
    #[test]
    fn cli_passwords_warn_about_the_process_list() {
        let source = PasswordSource {
            cli_password: Some("correct horse"),
            allow_interactive: false,
        };
        source.unlock_password().unwrap();
        assert!(logs_contain(
            "vault password from the command line; it is visible in the process list"
        ));
    }

    #[traced_test]
    #[test]
    fn cli_passphrase_is_used_and_flagged() {
        let passphrase = bip39_passphrase(Some("TREZOR"));

        assert_eq!("TREZOR", passphrase.as_str());
        assert!(logs_contain(
            "BIP-39 passphrase from the command line; it is visible in the process list"
        ));
    }

    #[traced_test]
    #[test]
    fn empty_cli_passphrase_is_kept() {
        assert_eq!("", bip39_passphrase(Some("")).as_str());
        assert!(logs_contain("visible in the process list"));
    }
}
