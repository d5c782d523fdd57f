// ── Domain model ──

use std::fmt;

use indexmap::IndexMap;

/// A shared printer advertised by the SMB print server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePrinter {
    pub name: String,
    pub description: String,
}

/// A local spooler queue backed by a share on the print server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalPrinterBinding {
    /// Share name on the server (final path segment of the queue URL).
    pub remote_name: String,
    /// Name of the queue in the local spooler.
    pub install_name: String,
}

impl LocalPrinterBinding {
    pub fn new(remote_name: impl Into<String>, install_name: impl Into<String>) -> Self {
        Self {
            remote_name: remote_name.into(),
            install_name: install_name.into(),
        }
    }
}

impl fmt::Display for LocalPrinterBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.remote_name, self.install_name)
    }
}

/// Printers listed by the server, keyed by name in listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrinterDirectory {
    printers: IndexMap<String, String>,
}

impl PrinterDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a printer. A repeated name keeps its first position and takes
    /// the newer description.
    pub fn insert(&mut self, name: impl Into<String>, description: impl Into<String>) {
        self.printers.insert(name.into(), description.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.printers.contains_key(name)
    }

    pub fn description(&self, name: &str) -> Option<&str> {
        self.printers.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.printers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.printers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = RemotePrinter> + '_ {
        self.printers.iter().map(|(name, description)| RemotePrinter {
            name: name.clone(),
            description: description.clone(),
        })
    }

    /// Printers whose name starts with `prefix`, in listing order.
    pub fn with_prefix(&self, prefix: &str) -> Vec<RemotePrinter> {
        self.iter().filter(|p| p.name.starts_with(prefix)).collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PrinterDirectory {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dir = Self::new();
        for (name, description) in iter {
            dir.insert(name, description);
        }
        dir
    }
}
