//! Settings and credential storage for auprint.
//!
//! TOML settings merged with `AUPRINT_` environment variables, the
//! write-through credential file, and translation to
//! `auprint_core::ServerConfig`.

mod credentials;

use std::collections::BTreeMap;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use auprint_core::config::{DEFAULT_DOMAIN, DEFAULT_HOST, DEFAULT_PPD, resolve_address};
use auprint_core::{BuildingTable, CoreError, ServerConfig, Tools};

pub use credentials::{AUID_KEY, CredentialStore, PASSWORD_KEY};

/// Environment variable overriding the settings file location.
pub const CONFIG_ENV: &str = "AUPRINT_CONFIG";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("invalid credential file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize credentials: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error(transparent)]
    Server(#[from] CoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML settings structs ───────────────────────────────────────────

/// Top-level settings file.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Settings {
    /// Where the AUID and password are kept.
    pub credentials_file: Option<PathBuf>,

    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub tools: ToolSettings,

    /// Extra or replacement building code → name entries.
    #[serde(default)]
    pub buildings: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_domain")]
    pub domain: String,

    /// Fixed server address; skips DNS when set.
    pub address: Option<IpAddr>,

    #[serde(default = "default_ppd")]
    pub ppd: PathBuf,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            domain: default_domain(),
            address: None,
            ppd: default_ppd(),
        }
    }
}

fn default_host() -> String {
    DEFAULT_HOST.into()
}
fn default_domain() -> String {
    DEFAULT_DOMAIN.into()
}
fn default_ppd() -> PathBuf {
    DEFAULT_PPD.into()
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ToolSettings {
    #[serde(default = "default_smbclient")]
    pub smbclient: String,
    #[serde(default = "default_lpstat")]
    pub lpstat: String,
    #[serde(default = "default_lpadmin")]
    pub lpadmin: String,
    #[serde(default = "default_lpr")]
    pub lpr: String,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            smbclient: default_smbclient(),
            lpstat: default_lpstat(),
            lpadmin: default_lpadmin(),
            lpr: default_lpr(),
        }
    }
}

fn default_smbclient() -> String {
    "smbclient".into()
}
fn default_lpstat() -> String {
    "lpstat".into()
}
fn default_lpadmin() -> String {
    "lpadmin".into()
}
fn default_lpr() -> String {
    "lpr".into()
}

// ── Paths ───────────────────────────────────────────────────────────

/// Per-user config directory via XDG / platform conventions.
pub fn config_dir() -> PathBuf {
    ProjectDirs::from("dk", "au", "auprint").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("auprint");
            p
        },
        |dirs| dirs.config_dir().to_path_buf(),
    )
}

/// Settings file path, honouring `AUPRINT_CONFIG`.
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV).map_or_else(|| config_dir().join("config.toml"), PathBuf::from)
}

impl Settings {
    /// Credential file from the settings, or the default location.
    pub fn credentials_path(&self) -> PathBuf {
        self.credentials_file
            .clone()
            .unwrap_or_else(|| config_dir().join("credentials.toml"))
    }
}

// ── Loading ─────────────────────────────────────────────────────────

/// Load settings from the canonical path plus environment.
pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from(&config_path())
}

/// Load settings from `path` (missing file is fine) plus environment.
///
/// Nested keys in the environment are separated by `__`, e.g.
/// `AUPRINT_SERVER__HOST`.
pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    debug!(path = %path.display(), "loading settings");
    let figment = Figment::new()
        .merge(Serialized::defaults(Settings::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("AUPRINT_").split("__"));

    Ok(figment.extract()?)
}

// ── Translation to core types ───────────────────────────────────────

/// Build a `ServerConfig`, resolving the server address unless pinned.
pub fn server_config(settings: &Settings) -> Result<ServerConfig, ConfigError> {
    let server = &settings.server;
    if server.host.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "server.host".into(),
            reason: "must not be empty".into(),
        });
    }

    let address = match server.address {
        Some(ip) => ip,
        None => resolve_address(&server.host)?,
    };
    debug!(host = %server.host, %address, "print server address");

    Ok(ServerConfig {
        host: server.host.clone(),
        address,
        domain: server.domain.clone(),
        ppd: server.ppd.clone(),
        tools: Tools {
            smbclient: settings.tools.smbclient.clone(),
            lpstat: settings.tools.lpstat.clone(),
            lpadmin: settings.tools.lpadmin.clone(),
            lpr: settings.tools.lpr.clone(),
        },
    })
}

/// Default building table with the settings' overrides applied.
pub fn building_table(settings: &Settings) -> BuildingTable {
    let mut table = BuildingTable::default();
    table.extend(settings.buildings.iter().map(|(c, n)| (c.as_str(), n.as_str())));
    table
}
