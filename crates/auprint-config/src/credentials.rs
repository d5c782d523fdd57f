// ── Credential store ──
//
// Flat key-value TOML file holding the AUID and password. Every `set`
// rewrites the whole file before returning.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use auprint_core::Credentials;

use crate::ConfigError;

pub const AUID_KEY: &str = "auid";
pub const PASSWORD_KEY: &str = "password";

/// Write-through key-value store backed by a TOML file.
#[derive(Debug)]
pub struct CredentialStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl CredentialStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(text) => toml::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), keys = values.len(), "opened credential store");
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored value for `key`; empty values read as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Store `value` under `key`, or remove the key for `None`, then
    /// rewrite the file.
    pub fn set(&mut self, key: &str, value: Option<&str>) -> Result<(), ConfigError> {
        match value {
            Some(v) => {
                self.values.insert(key.to_owned(), v.to_owned());
            }
            None => {
                self.values.remove(key);
            }
        }
        self.save()
    }

    /// Both AUID and password, when both are stored.
    pub fn credentials(&self) -> Option<Credentials> {
        Some(Credentials::new(self.get(AUID_KEY)?, self.get(PASSWORD_KEY)?))
    }

    /// Forget the AUID and password.
    pub fn clear_credentials(&mut self) -> Result<(), ConfigError> {
        self.set(AUID_KEY, None)?;
        self.set(PASSWORD_KEY, None)
    }

    fn save(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = toml::to_string(&self.values)?;
        write_private(&self.path, text.as_bytes())?;
        debug!(path = %self.path.display(), "saved credential store");
        Ok(())
    }
}

/// Write `contents` readable by the owner only; the file holds a password.
#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // `mode` only applies on creation.
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    file.write_all(contents)
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    std::fs::write(path, contents)
}
