// ── Runtime server configuration ──
//
// These types describe *which* print server to talk to and *which*
// local programs to drive. They never touch disk: auprint-config
// builds a `ServerConfig` and hands it in.

use std::fmt;
use std::net::{IpAddr, ToSocketAddrs};
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};

use crate::error::CoreError;

/// Print server hostname at Aarhus University.
pub const DEFAULT_HOST: &str = "print.uni.au.dk";

/// Windows domain the AUID belongs to.
pub const DEFAULT_DOMAIN: &str = "uni";

/// Generic PDF driver profile every queue is installed with.
pub const DEFAULT_PPD: &str = "/usr/share/ppd/cupsfilters/Generic-PDF_Printer-PDF.ppd";

/// Names (or paths) of the external programs auprint drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tools {
    /// SMB share listing.
    pub smbclient: String,
    /// Spooler status (`lpstat -v`).
    pub lpstat: String,
    /// Spooler management (install, delete, set URI).
    pub lpadmin: String,
    /// Print submission.
    pub lpr: String,
}

impl Default for Tools {
    fn default() -> Self {
        Self {
            smbclient: "smbclient".into(),
            lpstat: "lpstat".into(),
            lpadmin: "lpadmin".into(),
            lpr: "lpr".into(),
        }
    }
}

/// Everything needed to reach the print server and manage local queues.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Hostname handed to `smbclient`.
    pub host: String,
    /// Resolved address embedded in queue URLs and used to recognise them.
    pub address: IpAddr,
    /// Authentication domain prefixed to the AUID.
    pub domain: String,
    /// Driver profile passed to `lpadmin -P`.
    pub ppd: PathBuf,
    pub tools: Tools,
}

impl ServerConfig {
    /// Config for `host` at an already known `address`, with default
    /// domain, driver profile and tool names.
    pub fn new(host: impl Into<String>, address: IpAddr) -> Self {
        Self {
            host: host.into(),
            address,
            domain: DEFAULT_DOMAIN.into(),
            ppd: PathBuf::from(DEFAULT_PPD),
            tools: Tools::default(),
        }
    }
}

/// Resolve `host` through the system resolver.
///
/// Prefers the first IPv4 address, since that is what CUPS queues created
/// by earlier runs embed, and falls back to whatever comes first.
pub fn resolve_address(host: &str) -> Result<IpAddr, CoreError> {
    let addrs: Vec<IpAddr> = (host, 0)
        .to_socket_addrs()
        .map_err(|e| CoreError::AddressResolution {
            host: host.into(),
            reason: e.to_string(),
        })?
        .map(|sa| sa.ip())
        .collect();

    addrs
        .iter()
        .find(|ip| ip.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
        .ok_or_else(|| CoreError::AddressResolution {
            host: host.into(),
            reason: "no addresses returned".into(),
        })
}

// ── Credentials ─────────────────────────────────────────────────────

/// AUID plus password for the print server.
#[derive(Clone)]
pub struct Credentials {
    pub auid: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(auid: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            auid: auid.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// The password exposed for embedding in a command argument.
    pub fn expose_password(&self) -> &str {
        self.password.expose_secret()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("auid", &self.auid)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// An AUID is usable when it is non-empty and starts with `au`.
pub fn is_valid_auid(auid: &str) -> bool {
    !auid.is_empty() && auid.starts_with("au")
}

/// A password is usable when something is left after trimming.
pub fn is_valid_password(password: &str) -> bool {
    !password.trim().is_empty()
}
