use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use directories::ProjectDirs;

pub const ENCRYPTED_DIR_NAME: &str = "wallets_encrypted";
pub const DECRYPTED_DIR_NAME: &str = "wallets_decrypted";

#[derive(Debug, Clone)]
pub struct DataDirectory {
    data_dir: PathBuf,
}

impl DataDirectory {
    ///////////////////////////////////////////////////////////////////////////
    ///
    /// The directory holding vault files and plaintext exports
    ///
    /// `root_dir` is used as given. Without it the default varies by operating
    /// system, e.g.
    ///
    /// - Linux:   /home/alice/.local/share/chainvault
    /// - Windows: C:\Users\Alice\AppData\Roaming\chainvault\chainvault\data
    /// - macOS:   /Users/Alice/Library/Application Support/org.chainvault.chainvault
    pub fn get(root_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match root_dir {
            Some(dir) => dir,
            None => ProjectDirs::from("org", "chainvault", "chainvault")
                .context("Could not determine data directory")?
                .data_dir()
                .to_path_buf(),
        };

        Ok(DataDirectory { data_dir })
    }

    /// Create directory if it does not exist
    pub fn create_dir_if_not_exists(dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create data directory {}", dir.to_string_lossy()))
    }

    ///////////////////////////////////////////////////////////////////////////
    ///
    /// The root data directory path
    pub fn root_dir_path(&self) -> PathBuf {
        self.data_dir.clone()
    }

    /// The directory vault files are written to and listed from.
    pub fn encrypted_dir_path(&self) -> PathBuf {
        self.data_dir.join(Path::new(ENCRYPTED_DIR_NAME))
    }

    /// The directory CSV exports are written to.
    ///
    /// Files here hold secrets in plaintext.
    pub fn decrypted_dir_path(&self) -> PathBuf {
        self.data_dir.join(Path::new(DECRYPTED_DIR_NAME))
    }

    /// Resolve a vault given on the command line: paths that exist are used
    /// as-is, bare file names are looked up in the encrypted directory.
    pub fn resolve_vault_path(&self, file: &Path) -> PathBuf {
        if file.exists() || file.components().count() > 1 {
            file.to_path_buf()
        } else {
            self.encrypted_dir_path().join(file)
        }
    }
}

impl std::fmt::Display for DataDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.data_dir.display())
    }
}
